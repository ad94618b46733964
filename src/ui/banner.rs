use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Page-level failure banner. Card rendering is suppressed while this is up;
/// the same page load can be retried from here.
pub struct ErrorBanner<'a> {
    pub message: &'a str,
}

impl<'a> Widget for ErrorBanner<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let text = format!("Couldn't load repositories: {}", self.message);
        let hint = "press r to retry";
        let box_w = (UnicodeWidthStr::width(text.as_str()).max(hint.len()) as u16 + 4)
            .min(area.width);
        let box_h: u16 = 4;
        if area.width < 4 || area.height < box_h {
            return;
        }

        let x = area.x + (area.width - box_w) / 2;
        let y = area.y + (area.height - box_h) / 2;
        let banner = Rect::new(x, y, box_w, box_h);
        Clear.render(banner, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ERROR_FG));
        let inner = block.inner(banner);
        block.render(banner, buf);

        if inner.height >= 1 {
            let line = Line::from(Span::styled(text, Style::default().fg(theme::ERROR_FG)));
            buf.set_line(inner.x + 1, inner.y, &line, inner.width.saturating_sub(1));
        }
        if inner.height >= 2 {
            let line = Line::from(Span::styled(hint, Style::default().fg(theme::DIM_TEXT)));
            buf.set_line(inner.x + 1, inner.y + 1, &line, inner.width.saturating_sub(1));
        }
    }
}

pub struct LoadingBanner;

impl Widget for LoadingBanner {
    fn render(self, area: Rect, buf: &mut Buf) {
        if area.height == 0 {
            return;
        }
        let text = "Loading repositories\u{2026}";
        let w = UnicodeWidthStr::width(text) as u16;
        let x = area.x + area.width.saturating_sub(w) / 2;
        let y = area.y + area.height / 2;
        let line = Line::from(Span::styled(text, Style::default().fg(theme::DIM_TEXT)));
        buf.set_line(x, y, &line, area.width.saturating_sub(x - area.x));
    }
}
