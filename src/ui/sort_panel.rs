use crate::catalog::sort::SortMode;
use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};

pub struct SortPanel {
    pub cursor: usize,
    pub current: SortMode,
}

impl Widget for SortPanel {
    fn render(self, area: Rect, buf: &mut Buf) {
        let popup = super::centered_rect(40, 60, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Sort ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));
        let inner = block.inner(popup);
        block.render(popup, buf);

        for (i, mode) in SortMode::ALL.iter().enumerate() {
            if i >= inner.height as usize {
                break;
            }
            let y = inner.y + i as u16;
            let radio = if *mode == self.current {
                "\u{25c9}"
            } else {
                "\u{25cb}"
            };
            let style = if i == self.cursor {
                Style::default()
                    .fg(theme::FILTER_COLOR)
                    .bg(theme::SELECTED_BG)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let line = Line::from(Span::styled(format!(" {radio} {}", mode.label()), style));
            buf.set_line(inner.x, y, &line, inner.width);
            if i == self.cursor {
                for x in inner.x..inner.right() {
                    buf[(x, y)].set_style(Style::default().bg(theme::SELECTED_BG));
                }
            }
        }
    }
}
