use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    app::Sender,
    draw,
    enums::{Align, Color, Event, Font},
    prelude::*,
    widget::Widget,
};

use crate::app::controllers::tabs::{TabId, TabView};
use crate::app::domain::messages::Message;

pub const TAB_BAR_HEIGHT: i32 = 30;

const MIN_TAB_WIDTH: i32 = 60;
const MAX_TAB_WIDTH: i32 = 200;
const CLOSE_BTN_SIZE: i32 = 14;
const CLOSE_BTN_MARGIN: i32 = 6;
const TAB_H_PADDING: i32 = 10;
const CORNER_RADIUS: i32 = 6;
const TAB_GAP: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TabSlot {
    x: i32,
    width: i32,
}

#[derive(Debug, PartialEq, Eq)]
enum HitResult {
    Tab { index: usize, is_close: bool },
    None,
}

struct TabBarState {
    tabs: Vec<TabView>,
    layout: Vec<TabSlot>,
    hover_tab_index: Option<usize>,
    hover_close: bool,
    sender: Sender<Message>,
}

/// Custom-drawn strip of tabs: Home first, then one tab per open document.
pub struct TabBar {
    pub widget: Widget,
    state: Rc<RefCell<TabBarState>>,
}

impl TabBar {
    pub fn new(x: i32, y: i32, w: i32, sender: Sender<Message>) -> Self {
        let state = Rc::new(RefCell::new(TabBarState {
            tabs: Vec::new(),
            layout: Vec::new(),
            hover_tab_index: None,
            hover_close: false,
            sender,
        }));

        let mut widget = Widget::new(x, y, w, TAB_BAR_HEIGHT, None);

        let draw_state = state.clone();
        widget.draw(move |wid| {
            let mut st = draw_state.borrow_mut();
            // Width changes with window resizes, so lay out on every draw.
            st.layout = compute_layout(st.tabs.len(), wid.w());
            draw_tab_bar(wid, &st);
        });

        let handle_state = state.clone();
        widget.handle(move |wid, event| handle_tab_bar(wid, event, &handle_state));

        Self { widget, state }
    }

    pub fn rebuild(&mut self, tabs: Vec<TabView>) {
        let mut st = self.state.borrow_mut();
        st.layout = compute_layout(tabs.len(), self.widget.w());
        st.tabs = tabs;
        st.hover_tab_index = None;
        st.hover_close = false;
        drop(st);
        self.widget.redraw();
    }
}

// --- Layout computation ---

fn compute_layout(tab_count: usize, widget_w: i32) -> Vec<TabSlot> {
    if tab_count == 0 {
        return Vec::new();
    }
    let count = tab_count as i32;
    let available = widget_w - TAB_GAP * (count - 1);
    let width = (available / count).clamp(MIN_TAB_WIDTH, MAX_TAB_WIDTH);

    (0..count)
        .map(|i| TabSlot {
            x: i * (width + TAB_GAP),
            width,
        })
        .collect()
}

// --- Hit-testing ---

fn close_button_origin(slot: &TabSlot, wy: i32) -> (i32, i32) {
    (
        slot.x + slot.width - CLOSE_BTN_MARGIN - CLOSE_BTN_SIZE,
        wy + (TAB_BAR_HEIGHT - CLOSE_BTN_SIZE) / 2,
    )
}

/// `mx` is relative to the widget's left edge, `my` is absolute.
fn hit_test_layout(
    layout: &[TabSlot],
    closable: &[bool],
    wy: i32,
    mx: i32,
    my: i32,
) -> HitResult {
    if my < wy || my >= wy + TAB_BAR_HEIGHT {
        return HitResult::None;
    }

    for (index, slot) in layout.iter().enumerate() {
        if mx >= slot.x && mx < slot.x + slot.width {
            let (close_x, close_y) = close_button_origin(slot, wy);
            let is_close = closable.get(index).copied().unwrap_or(false)
                && mx >= close_x
                && mx <= close_x + CLOSE_BTN_SIZE
                && my >= close_y
                && my <= close_y + CLOSE_BTN_SIZE;
            return HitResult::Tab { index, is_close };
        }
    }
    HitResult::None
}

// --- Drawing ---

struct TabColors {
    bar_bg: Color,
    active_bg: Color,
    inactive_bg: Color,
    active_text: Color,
    inactive_text: Color,
    close_hover_bg: Color,
}

fn tab_colors() -> TabColors {
    TabColors {
        bar_bg: Color::from_rgb(200, 200, 200),
        active_bg: Color::from_rgb(255, 255, 255),
        inactive_bg: Color::from_rgb(220, 220, 220),
        active_text: Color::from_rgb(0, 0, 0),
        inactive_text: Color::from_rgb(80, 80, 80),
        close_hover_bg: Color::from_rgb(190, 190, 190),
    }
}

fn truncate_to_fit(text: &str, max_width: i32) -> String {
    if max_width <= 0 {
        return String::new();
    }
    draw::set_font(Font::Helvetica, 12);
    let (tw, _) = draw::measure(text, true);
    if tw <= max_width {
        return text.to_string();
    }

    let ellipsis = "...";
    let (ew, _) = draw::measure(ellipsis, true);
    if ew >= max_width {
        return ellipsis.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    for len in (1..chars.len()).rev() {
        let candidate: String = chars[..len].iter().collect();
        let full = format!("{candidate}{ellipsis}");
        let (fw, _) = draw::measure(&full, true);
        if fw <= max_width {
            return full;
        }
    }
    ellipsis.to_string()
}

fn draw_rounded_top_rect(x: i32, y: i32, w: i32, h: i32, r: i32, color: Color) {
    draw::set_draw_color(color);
    draw::draw_rectf(x, y + r, w, h - r);
    draw::draw_rectf(x + r, y, w - 2 * r, r);
    draw::draw_pie(x, y, 2 * r, 2 * r, 90.0, 180.0);
    draw::draw_pie(x + w - 2 * r, y, 2 * r, 2 * r, 0.0, 90.0);
}

fn draw_tab_bar(wid: &Widget, st: &TabBarState) {
    let wx = wid.x();
    let wy = wid.y();
    let wh = wid.h();
    let colors = tab_colors();

    draw::set_draw_color(colors.bar_bg);
    draw::draw_rectf(wx, wy, wid.w(), wh);

    for (index, (slot, tab)) in st.layout.iter().zip(&st.tabs).enumerate() {
        let tx = wx + slot.x;

        if tab.is_active {
            draw_rounded_top_rect(tx, wy, slot.width, wh, CORNER_RADIUS, colors.active_bg);
        } else {
            draw_rounded_top_rect(tx, wy + 2, slot.width, wh - 2, CORNER_RADIUS, colors.inactive_bg);
        }

        let text_color = if tab.is_active { colors.active_text } else { colors.inactive_text };
        let reserved = if tab.closable { CLOSE_BTN_MARGIN + CLOSE_BTN_SIZE } else { 0 };
        let text_area_width = slot.width - TAB_H_PADDING - reserved - TAB_H_PADDING;
        let display_text = truncate_to_fit(&tab.title, text_area_width);

        draw::set_draw_color(text_color);
        draw::set_font(Font::Helvetica, 12);
        draw::draw_text(&display_text, tx + TAB_H_PADDING, wy + (wh + 12) / 2);

        if !tab.closable {
            continue;
        }

        let (close_x, close_y) = close_button_origin(slot, wy);
        let close_x = wx + close_x;
        let is_hovered_tab = st.hover_tab_index == Some(index);
        if is_hovered_tab && st.hover_close {
            draw::set_draw_color(colors.close_hover_bg);
            draw::draw_rectf(close_x - 2, close_y - 2, CLOSE_BTN_SIZE + 4, CLOSE_BTN_SIZE + 4);
        }

        let close_color = if tab.is_active || is_hovered_tab { text_color } else { colors.inactive_text };
        draw::set_draw_color(close_color);
        draw::set_font(Font::HelveticaBold, 20);
        draw::draw_text2("\u{00d7}", close_x, close_y, CLOSE_BTN_SIZE, CLOSE_BTN_SIZE, Align::Center);
    }
}

// --- Event handling ---

fn handle_tab_bar(wid: &mut Widget, event: Event, state: &Rc<RefCell<TabBarState>>) -> bool {
    match event {
        Event::Push => {
            let st = state.borrow();
            let mx = fltk::app::event_x() - wid.x();
            let my = fltk::app::event_y();
            let button = fltk::app::event_button();
            let closable: Vec<bool> = st.tabs.iter().map(|t| t.closable).collect();

            let HitResult::Tab { index, is_close } =
                hit_test_layout(&st.layout, &closable, wid.y(), mx, my)
            else {
                return false;
            };
            let Some(tab) = st.tabs.get(index) else {
                return false;
            };
            let sender = st.sender;
            let tab_id = tab.id;
            drop(st);

            // Middle click or the close glyph closes; Home has neither.
            match (tab_id, button) {
                (TabId::Document(doc_id), 2) => sender.send(Message::TabClose(doc_id)),
                (TabId::Document(doc_id), 1) if is_close => sender.send(Message::TabClose(doc_id)),
                (_, 1) => sender.send(Message::TabSwitch(tab_id)),
                _ => {}
            }
            true
        }
        Event::Move => {
            let mut st = state.borrow_mut();
            let mx = fltk::app::event_x() - wid.x();
            let my = fltk::app::event_y();
            let closable: Vec<bool> = st.tabs.iter().map(|t| t.closable).collect();

            let (new_hover, new_close) = match hit_test_layout(&st.layout, &closable, wid.y(), mx, my) {
                HitResult::Tab { index, is_close } => (Some(index), is_close),
                HitResult::None => (None, false),
            };

            if new_hover != st.hover_tab_index || new_close != st.hover_close {
                st.hover_tab_index = new_hover;
                st.hover_close = new_close;
                drop(st);
                wid.redraw();
            }
            true
        }
        Event::Leave => {
            let mut st = state.borrow_mut();
            if st.hover_tab_index.is_some() || st.hover_close {
                st.hover_tab_index = None;
                st.hover_close = false;
                drop(st);
                wid.redraw();
            }
            false
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_empty() {
        assert!(compute_layout(0, 800).is_empty());
    }

    #[test]
    fn test_layout_caps_width() {
        let layout = compute_layout(2, 1000);
        assert_eq!(layout[0], TabSlot { x: 0, width: MAX_TAB_WIDTH });
        assert_eq!(layout[1].x, MAX_TAB_WIDTH + TAB_GAP);
    }

    #[test]
    fn test_layout_shrinks_to_minimum() {
        let layout = compute_layout(50, 600);
        assert!(layout.iter().all(|s| s.width == MIN_TAB_WIDTH));
    }

    #[test]
    fn test_hit_test_tab_body_and_close() {
        let layout = compute_layout(2, 1000);
        let closable = [false, true];
        let wy = 30;
        let mid_y = wy + TAB_BAR_HEIGHT / 2;

        assert_eq!(
            hit_test_layout(&layout, &closable, wy, 5, mid_y),
            HitResult::Tab { index: 0, is_close: false }
        );

        let (close_x, _) = close_button_origin(&layout[1], wy);
        assert_eq!(
            hit_test_layout(&layout, &closable, wy, close_x + 2, mid_y),
            HitResult::Tab { index: 1, is_close: true }
        );
    }

    #[test]
    fn test_hit_test_home_has_no_close() {
        let layout = compute_layout(1, 1000);
        let (close_x, _) = close_button_origin(&layout[0], 0);
        assert_eq!(
            hit_test_layout(&layout, &[false], 0, close_x + 2, TAB_BAR_HEIGHT / 2),
            HitResult::Tab { index: 0, is_close: false }
        );
    }

    #[test]
    fn test_hit_test_outside() {
        let layout = compute_layout(1, 1000);
        assert_eq!(hit_test_layout(&layout, &[true], 0, 900, 10), HitResult::None);
        assert_eq!(hit_test_layout(&layout, &[true], 0, 10, TAB_BAR_HEIGHT + 5), HitResult::None);
    }
}
