//! plasma stories - every component on one screen
//!
//! Tab / Shift-Tab cycle focus, q or Esc quits. Logs go to stderr; set
//! `RUST_LOG=plasma=debug` and redirect stderr to a file to see them.

use anyhow::Result;
use plasma::{
    component::Component,
    components::{Checkbox, TabItem, Tabs, Text, TimePicker, TimePickerConfig, TopNavBar},
    context::RenderContext,
    event::{Event, EventHandler, EventPoller, Key},
    layout::{FlexDirection, FlexLayout, Rect, Size},
    time::{DefaultOption, TimeFormat},
    Renderer, Theme,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Index of the Tabs inside the navigation bar
const NAV_TABS: usize = 1;

struct Stories {
    nav: TopNavBar,
    picker: TimePicker,
    checkboxes: Vec<Checkbox>,
    status: Text,
    focus: usize,
}

impl Stories {
    fn focus_targets(&self) -> usize {
        2 + self.checkboxes.len()
    }

    fn target(&mut self, index: usize) -> Option<&mut dyn Component> {
        match index {
            0 => self
                .nav
                .children_mut()
                .get_mut(NAV_TABS)
                .map(|tabs| tabs.as_mut() as &mut dyn Component),
            1 => Some(&mut self.picker as &mut dyn Component),
            i => self
                .checkboxes
                .get_mut(i - 2)
                .map(|c| c as &mut dyn Component),
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let count = self.focus_targets();
        if let Some(current) = self.target(self.focus) {
            current.on_blur();
        }
        self.focus = if forward {
            (self.focus + 1) % count
        } else {
            (self.focus + count - 1) % count
        };
        if let Some(next) = self.target(self.focus) {
            next.on_focus();
        }
    }

    /// Focused component first, then mouse events to everyone
    fn dispatch(&mut self, event: &Event) -> bool {
        if let Event::Mouse(_) = event {
            return self.nav.handle_event(event)
                || self.picker.handle_event(event)
                || self.checkboxes.iter_mut().any(|c| c.handle_event(event));
        }
        match self.target(self.focus) {
            Some(target) => target.handle_event(event),
            None => false,
        }
    }

    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        let mut sizes = vec![Size::Fixed(1), Size::Fixed(1), Size::Fixed(1)];
        sizes.extend(self.checkboxes.iter().map(|c| Size::Fixed(c.min_size().1)));
        sizes.push(Size::Flex(1));
        sizes.push(Size::Fixed(1));

        let rows = FlexLayout::new(FlexDirection::Column)
            .gap(1)
            .layout(bounds, &sizes);

        renderer.clear()?;
        self.nav.render(renderer, rows[0], ctx)?;
        Text::new("Pick a time, toggle some pets")
            .with_style(ctx.theme.label_style())
            .render(renderer, rows[1].inset_x(1), ctx)?;

        for (checkbox, rect) in self.checkboxes.iter_mut().zip(&rows[3..]) {
            checkbox.render(renderer, rect.inset_x(1), ctx)?;
        }
        if let Some(status) = rows.last() {
            self.status.render(renderer, status.inset_x(1), ctx)?;
        }

        // Last so the open dropdown overlays the checkboxes
        let picker_width = self.picker.min_size().0;
        let picker_row = rows[2].inset_x(1);
        self.picker.render(
            renderer,
            Rect::new(picker_row.x, picker_row.y, picker_width.min(picker_row.width), 1),
            ctx,
        )?;
        Ok(())
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Create renderer and theme
    let mut renderer = Renderer::new()?;
    let theme = Theme::new(renderer.capabilities());
    let ctx = RenderContext::new(&theme);
    renderer.enter_alt_screen()?;
    renderer.hide_cursor()?;

    let events = EventPoller::new()?;

    // Host-side state, fed back into the controlled components
    let picked: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
    let log: Rc<RefCell<String>> = Rc::new(RefCell::new("Tab cycles focus, q quits".into()));

    let tabs_log = log.clone();
    let tabs = Tabs::new(vec![
        TabItem::new("Overview", "overview"),
        TabItem::new("Schedule", "schedule").selected(true),
        TabItem::new("Billing", "billing"),
    ])
    .on_change(move |label, index| {
        *tabs_log.borrow_mut() = format!("tab {} ({}) activated", label, index);
    });

    let nav = TopNavBar::new(vec![
        Box::new(Text::new("plasma")),
        Box::new(tabs),
        Box::new(Text::new("")),
        Box::new(Text::new("stories")),
    ])
    .with_flex(2, 1);

    let picker_sink = picked.clone();
    let config = TimePickerConfig {
        min_time: "08:00".into(),
        max_time: "18:00".into(),
        time_interval_minutes: 15,
        time_format: TimeFormat::Hour12,
        default_option: DefaultOption::NextInterval,
        name: Some("appointment".into()),
        ..Default::default()
    };
    let picker = TimePicker::new(config)?.on_change(move |value| {
        *picker_sink.borrow_mut() = Some(value.to_string());
    });

    let checkboxes = ["Dog", "Cat", "Snake", "Bird"]
        .into_iter()
        .map(|pet| {
            let sink = log.clone();
            Checkbox::new()
                .with_fancy(true)
                .with_name(pet.to_lowercase())
                .with_text(pet)
                .on_change(move |change| {
                    *sink.borrow_mut() = format!("{:?} -> {}", change.name, change.checked);
                })
        })
        .chain([
            Checkbox::new()
                .with_text("Send reminders")
                .with_description("Hint: this is some text.")
                .with_indeterminate(true),
            Checkbox::new().with_text("Archived").with_checked(true).with_disabled(true),
        ])
        .collect();

    let mut stories = Stories {
        nav,
        picker,
        checkboxes,
        status: Text::new(""),
        focus: 0,
    };
    if let Some(first) = stories.target(0) {
        first.on_focus();
    }

    let (mut cols, mut rows) = renderer.context().char_dimensions();
    loop {
        stories.status.set_text(log.borrow().as_str());
        stories.render(&mut renderer, Rect::fullscreen(cols, rows), &ctx)?;
        renderer.flush()?;

        let Some(event) = events.poll(Duration::from_millis(16))? else {
            continue;
        };

        if stories.dispatch(&event) {
            if let Some(value) = picked.borrow_mut().take() {
                *log.borrow_mut() = format!("picked {}", value);
                stories.picker.set_value(Some(&value))?;
            }
            continue;
        }

        match event {
            Event::Key(Key::Char('q')) | Event::Key(Key::Ctrl('c')) | Event::Key(Key::Esc) => {
                break;
            }
            Event::Key(Key::Tab) => stories.move_focus(true),
            Event::Key(Key::BackTab) => stories.move_focus(false),
            Event::Resize(_cols, _rows) => {
                renderer.refresh_geometry()?;
                (cols, rows) = renderer.context().char_dimensions();
            }
            _ => {}
        }
    }

    // Cleanup
    renderer.exit_alt_screen()?;
    renderer.show_cursor()?;

    info!("stories finished");
    Ok(())
}
