use crate::app::Mode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    NextPage,
    PrevPage,
    ToggleFiles,
    OpenRepo,
    Retry,
    Search,
    SearchChar(char),
    SearchBackspace,
    SearchConfirm,
    SearchCancel,
    SortPanel,
    SortConfirm,
    SortCancel,
    Help,
    ClosePopup,
    Quit,
    None,
}

pub fn map_key(key: KeyEvent, mode: Mode) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match mode {
        Mode::Search => match key.code {
            KeyCode::Esc => Action::SearchCancel,
            KeyCode::Enter => Action::SearchConfirm,
            KeyCode::Backspace => Action::SearchBackspace,
            KeyCode::Char(c) => Action::SearchChar(c),
            _ => Action::None,
        },
        Mode::Sort => match key.code {
            KeyCode::Esc => Action::SortCancel,
            KeyCode::Enter => Action::SortConfirm,
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        },
        Mode::Help => match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
                Action::ClosePopup
            }
            _ => Action::None,
        },
        Mode::Normal => match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::Char('n') | KeyCode::Char('l') | KeyCode::Right => Action::NextPage,
            KeyCode::Char('p') | KeyCode::Char('h') | KeyCode::Left => Action::PrevPage,
            KeyCode::Char('f') | KeyCode::Char(' ') => Action::ToggleFiles,
            KeyCode::Char('o') | KeyCode::Enter => Action::OpenRepo,
            KeyCode::Char('/') => Action::Search,
            KeyCode::Char('s') => Action::SortPanel,
            KeyCode::Char('r') => Action::Retry,
            KeyCode::Char('?') => Action::Help,
            KeyCode::Esc => Action::ClosePopup,
            _ => Action::None,
        },
    }
}
