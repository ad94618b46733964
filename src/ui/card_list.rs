use crate::catalog::view_model::{CardPresentation, PanelView};
use crate::github::types::FileKind;
use crate::ui::{theme, truncate_with_ellipsis};
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub struct CardList<'a> {
    pub cards: &'a [CardPresentation],
    pub selected: usize,
    pub scroll: usize,
}

/// Lines a card occupies: title, description, optional panel, separator.
pub fn card_height(card: &CardPresentation) -> usize {
    3 + match &card.panel {
        PanelView::Hidden => 0,
        PanelView::Loading | PanelView::Empty | PanelView::Error(_) => 1,
        PanelView::Files(files) => files.len(),
    }
}

pub fn card_heights(cards: &[CardPresentation]) -> Vec<usize> {
    cards.iter().map(card_height).collect()
}

/// First card index to draw so the selected card fits in the viewport.
pub fn ensure_visible(
    heights: &[usize],
    mut scroll: usize,
    selected: usize,
    viewport: usize,
) -> usize {
    if heights.is_empty() {
        return 0;
    }
    let selected = selected.min(heights.len() - 1);
    if scroll > selected {
        scroll = selected;
    }
    loop {
        let used: usize = heights[scroll..=selected].iter().sum();
        if used <= viewport || scroll == selected {
            break;
        }
        scroll += 1;
    }
    scroll
}

impl Widget for CardList<'_> {
    fn render(self, area: Rect, buf: &mut Buf) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        if self.cards.is_empty() {
            let line = Line::from(Span::styled(
                "No repositories match.",
                Style::default().fg(theme::DIM_TEXT),
            ));
            buf.set_line(area.x + 2, area.y + 1, &line, area.width.saturating_sub(2));
            return;
        }

        let mut y = area.y;
        for (idx, pres) in self.cards.iter().enumerate().skip(self.scroll) {
            if y >= area.bottom() {
                break;
            }
            y = render_card(pres, idx == self.selected, area, y, buf);
        }
    }
}

fn render_card(pres: &CardPresentation, selected: bool, area: Rect, start: u16, buf: &mut Buf) -> u16 {
    let card = &pres.card;
    let mut y = start;

    let marker = if selected { "\u{25b8} " } else { "  " };
    let title = Line::from(vec![
        Span::styled(
            format!("{marker}{}", card.name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  \u{25cf} ",
            Style::default().fg(theme::hex_color(card.language_color)),
        ),
        Span::styled(card.language.clone(), Style::default().fg(theme::DIM_TEXT)),
        Span::styled(
            format!("  \u{2605} {}", card.stars),
            Style::default().fg(theme::STAR_COLOR),
        ),
        Span::styled(
            format!("  \u{2442} {}  \u{25c9} {}", card.forks, card.watchers),
            Style::default().fg(theme::DIM_TEXT),
        ),
        Span::styled(
            format!("  updated {}", card.updated),
            Style::default().fg(theme::DIM_TEXT),
        ),
    ]);
    y = put_line(buf, area, y, &title, selected);

    let desc = truncate_with_ellipsis(&card.description, area.width.saturating_sub(4) as usize);
    let desc_line = Line::from(Span::styled(
        format!("    {desc}"),
        Style::default().fg(theme::DIM_TEXT),
    ));
    y = put_line(buf, area, y, &desc_line, selected);

    y = render_panel(&pres.panel, area, y, buf, selected);

    // separator row
    y.saturating_add(1)
}

fn render_panel(panel: &PanelView, area: Rect, mut y: u16, buf: &mut Buf, selected: bool) -> u16 {
    match panel {
        PanelView::Hidden => y,
        PanelView::Loading => put_line(
            buf,
            area,
            y,
            &dim_panel_line("Loading files\u{2026}"),
            selected,
        ),
        PanelView::Empty => put_line(buf, area, y, &dim_panel_line("No root files"), selected),
        PanelView::Error(message) => {
            let line = Line::from(Span::styled(
                format!("      ! {message}"),
                Style::default().fg(theme::ERROR_FG),
            ));
            put_line(buf, area, y, &line, selected)
        }
        PanelView::Files(files) => {
            for entry in files {
                let icon = match entry.kind {
                    FileKind::Directory => "\u{1f4c1}",
                    FileKind::File => "\u{1f4c4}",
                };
                let line = Line::from(vec![
                    Span::raw(format!("      {icon} ")),
                    Span::styled(
                        entry.name.clone(),
                        match entry.kind {
                            FileKind::Directory => Style::default().fg(theme::DIR_COLOR),
                            FileKind::File => Style::default(),
                        },
                    ),
                ]);
                y = put_line(buf, area, y, &line, selected);
            }
            y
        }
    }
}

fn dim_panel_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("      {text}"),
        Style::default().fg(theme::DIM_TEXT),
    ))
}

fn put_line(buf: &mut Buf, area: Rect, y: u16, line: &Line, selected: bool) -> u16 {
    if y >= area.bottom() {
        return y;
    }
    buf.set_line(area.x, y, line, area.width);
    if selected {
        for x in area.x..area.right() {
            buf[(x, y)].set_style(Style::default().bg(theme::SELECTED_BG));
        }
    }
    y + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::view_model::{build_card, PanelView};
    use crate::test_utils::{base_time, make_file, make_repo};

    fn pres(panel: PanelView) -> CardPresentation {
        CardPresentation {
            card: build_card(&make_repo("a", 0), base_time()),
            panel,
        }
    }

    #[test]
    fn heights_include_panel_lines() {
        assert_eq!(card_height(&pres(PanelView::Hidden)), 3);
        assert_eq!(card_height(&pres(PanelView::Loading)), 4);
        assert_eq!(card_height(&pres(PanelView::Empty)), 4);
        let files = vec![make_file("src", true), make_file("README.md", false)];
        assert_eq!(card_height(&pres(PanelView::Files(files))), 5);
    }

    #[test]
    fn scroll_advances_until_selection_fits() {
        let heights = [3, 3, 3];
        assert_eq!(ensure_visible(&heights, 0, 0, 6), 0);
        assert_eq!(ensure_visible(&heights, 0, 1, 6), 0);
        assert_eq!(ensure_visible(&heights, 0, 2, 6), 1);
        // scrolling back up snaps to the selection
        assert_eq!(ensure_visible(&heights, 2, 0, 6), 0);
    }

    #[test]
    fn oversized_selection_still_anchors_to_itself() {
        let heights = [3, 12, 3];
        assert_eq!(ensure_visible(&heights, 0, 1, 5), 1);
    }
}
