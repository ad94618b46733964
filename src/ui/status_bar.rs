use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

pub struct StatusBar<'a> {
    pub visible_count: usize,
    pub page: u32,
    pub can_prev: bool,
    pub can_next: bool,
    pub sort_label: &'a str,
    pub search_input: &'a str,
    pub search_active: bool,
    pub rate_limit: Option<u32>,
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let bg = Style::default().bg(theme::STATUS_BG);
        for x in area.x..area.right() {
            buf[(x, area.y)].set_style(bg);
        }

        if self.search_active {
            let line = Line::from(vec![
                Span::styled(
                    " /",
                    Style::default()
                        .fg(theme::FILTER_COLOR)
                        .bg(theme::STATUS_BG)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(self.search_input.to_string(), bg),
                Span::styled(
                    "\u{258c}",
                    Style::default().fg(theme::FILTER_COLOR).bg(theme::STATUS_BG),
                ),
            ]);
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        let mut spans = vec![Span::styled(
            format!(" Showing {} repos (Page {})", self.visible_count, self.page),
            bg,
        )];

        spans.push(separator());
        spans.push(Span::styled(
            format!(" sort: {} ", self.sort_label),
            Style::default().fg(theme::DIM_TEXT).bg(theme::STATUS_BG),
        ));

        if !self.search_input.is_empty() {
            spans.push(separator());
            spans.push(Span::styled(
                format!(" /{} ", self.search_input),
                Style::default().fg(theme::FILTER_COLOR).bg(theme::STATUS_BG),
            ));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);

        // right zone: pager and API quota
        let mut right = format!(
            "{} {:02} {}",
            if self.can_prev { "\u{2039}" } else { " " },
            self.page,
            if self.can_next { "\u{203a}" } else { " " },
        );
        if let Some(remaining) = self.rate_limit {
            right.push_str(&format!("  API: {remaining}"));
        }
        right.push(' ');

        let right_w = UnicodeWidthStr::width(right.as_str());
        let area_w = area.width as usize;
        if area_w > right_w {
            let right_x = area.x + (area_w - right_w) as u16;
            let span = Span::styled(right, Style::default().fg(theme::DIM_TEXT).bg(theme::STATUS_BG));
            buf.set_line(right_x, area.y, &Line::from(span), right_w as u16);
        }
    }
}

fn separator() -> Span<'static> {
    Span::styled(
        "\u{2502}",
        Style::default().fg(theme::SEPARATOR).bg(theme::STATUS_BG),
    )
}
