use std::{fmt, time::Duration};

use crossterm::event::{Event, KeyEvent};
use ratatui::Frame;

use crate::{App, Runtime};

/// One screen of the application.
///
/// Only the top screen of a [`ScreenStack`] receives input, ticks and draw
/// calls. Lifecycle hooks run in this order:
///
/// ```text
/// on_active ──► (foreground) ──► on_inactive ──► on_close    popped, replaced, exit
///     ▲                              │
///     └──────── (background) ◄───────┘                       another screen pushed
/// ```
///
/// A screen that changes the frame rate should do so in
/// [`on_active`](Self::on_active), so the rate is restored when it returns to
/// the foreground.
pub trait Screen: fmt::Debug {
    fn on_active(&mut self, _runtime: &mut Runtime) {}

    fn on_inactive(&mut self, _runtime: &mut Runtime) {}

    fn on_close(&mut self, _runtime: &mut Runtime) {}

    /// Handles a key press.
    fn handle_key(&mut self, runtime: &mut Runtime, key: KeyEvent) -> ScreenTransition;

    /// Advances the screen by one frame.
    fn update(&mut self, _runtime: &mut Runtime, _elapsed: Duration) -> ScreenTransition {
        ScreenTransition::Stay
    }

    fn draw(&self, frame: &mut Frame);
}

/// What the stack should do after a screen handled input or a tick.
#[derive(Debug)]
pub enum ScreenTransition {
    Stay,
    /// Puts a screen on top; the current one waits in the background.
    Push(Box<dyn Screen>),
    /// Closes the current screen and resumes the one below.
    Pop,
    /// Closes the current screen and shows another in its place.
    Replace(Box<dyn Screen>),
    /// Closes every screen and ends the application.
    Exit,
}

/// Stack of screens driven as one [`App`].
#[derive(Debug)]
pub struct ScreenStack {
    screens: Vec<Box<dyn Screen>>,
    exit_requested: bool,
}

impl ScreenStack {
    #[must_use]
    pub fn new(initial: Box<dyn Screen>) -> Self {
        Self {
            screens: vec![initial],
            exit_requested: false,
        }
    }

    fn close_top(&mut self, runtime: &mut Runtime) {
        if let Some(mut screen) = self.screens.pop() {
            screen.on_inactive(runtime);
            screen.on_close(runtime);
        }
    }

    fn apply(&mut self, runtime: &mut Runtime, transition: ScreenTransition) {
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::Push(mut screen) => {
                if let Some(top) = self.screens.last_mut() {
                    top.on_inactive(runtime);
                }
                screen.on_active(runtime);
                self.screens.push(screen);
            }
            ScreenTransition::Pop => {
                self.close_top(runtime);
                if let Some(top) = self.screens.last_mut() {
                    top.on_active(runtime);
                }
            }
            ScreenTransition::Replace(mut screen) => {
                self.close_top(runtime);
                screen.on_active(runtime);
                self.screens.push(screen);
            }
            ScreenTransition::Exit => {
                while !self.screens.is_empty() {
                    self.close_top(runtime);
                }
                self.exit_requested = true;
            }
        }
    }
}

impl App for ScreenStack {
    fn init(&mut self, runtime: &mut Runtime) {
        if let Some(top) = self.screens.last_mut() {
            top.on_active(runtime);
        }
    }

    fn should_exit(&self) -> bool {
        self.exit_requested || self.screens.is_empty()
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        let Some(key) = event.as_key_press_event() else {
            return;
        };
        if let Some(top) = self.screens.last_mut() {
            let transition = top.handle_key(runtime, key);
            self.apply(runtime, transition);
        }
    }

    fn update(&mut self, runtime: &mut Runtime, elapsed: Duration) {
        if let Some(top) = self.screens.last_mut() {
            let transition = top.update(runtime, elapsed);
            self.apply(runtime, transition);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        if let Some(top) = self.screens.last() {
            top.draw(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};

    use super::*;

    #[derive(Debug, Clone, Default)]
    struct Trace(Rc<RefCell<Vec<String>>>);

    impl Trace {
        fn push(&self, entry: String) {
            self.0.borrow_mut().push(entry);
        }

        fn take(&self) -> Vec<String> {
            std::mem::take(&mut self.0.borrow_mut())
        }
    }

    #[derive(Debug)]
    struct Probe {
        name: &'static str,
        trace: Trace,
        on_key: Option<ScreenTransition>,
        on_tick: Option<ScreenTransition>,
    }

    impl Probe {
        fn boxed(name: &'static str, trace: &Trace) -> Box<Self> {
            Box::new(Self {
                name,
                trace: trace.clone(),
                on_key: None,
                on_tick: None,
            })
        }
    }

    impl Screen for Probe {
        fn on_active(&mut self, _runtime: &mut Runtime) {
            self.trace.push(format!("{} active", self.name));
        }

        fn on_inactive(&mut self, _runtime: &mut Runtime) {
            self.trace.push(format!("{} inactive", self.name));
        }

        fn on_close(&mut self, _runtime: &mut Runtime) {
            self.trace.push(format!("{} close", self.name));
        }

        fn handle_key(&mut self, _runtime: &mut Runtime, key: KeyEvent) -> ScreenTransition {
            let label = match key.code {
                KeyCode::Char(c) => c.to_string(),
                other => format!("{other:?}"),
            };
            self.trace.push(format!("{} key {label}", self.name));
            self.on_key.take().unwrap_or(ScreenTransition::Stay)
        }

        fn update(&mut self, _runtime: &mut Runtime, elapsed: Duration) -> ScreenTransition {
            self.trace
                .push(format!("{} tick {}ms", self.name, elapsed.as_millis()));
            self.on_tick.take().unwrap_or(ScreenTransition::Stay)
        }

        fn draw(&self, _frame: &mut Frame) {}
    }

    fn press(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn test_init_activates_initial_screen() {
        let trace = Trace::default();
        let mut stack = ScreenStack::new(Probe::boxed("menu", &trace));
        stack.init(&mut Runtime::new());
        assert_eq!(trace.take(), ["menu active"]);
        assert!(!stack.should_exit());
    }

    #[test]
    fn test_push_then_pop_restores_lower_screen() {
        let trace = Trace::default();
        let mut runtime = Runtime::new();
        let mut stack = ScreenStack::new(Probe::boxed("game", &trace));
        stack.init(&mut runtime);

        let mut pause = Probe::boxed("pause", &trace);
        pause.on_key = Some(ScreenTransition::Pop);
        stack.apply(&mut runtime, ScreenTransition::Push(pause));
        stack.handle_event(&mut runtime, press('p'));

        assert_eq!(
            trace.take(),
            [
                "game active",
                "game inactive",
                "pause active",
                "pause key p",
                "pause inactive",
                "pause close",
                "game active",
            ]
        );
    }

    #[test]
    fn test_tick_can_replace_screen() {
        let trace = Trace::default();
        let mut runtime = Runtime::new();
        let mut game = Probe::boxed("game", &trace);
        game.on_tick = Some(ScreenTransition::Replace(Probe::boxed("scores", &trace)));
        let mut stack = ScreenStack::new(game);
        stack.init(&mut runtime);

        stack.update(&mut runtime, Duration::from_millis(16));
        stack.update(&mut runtime, Duration::from_millis(17));

        assert_eq!(
            trace.take(),
            [
                "game active",
                "game tick 16ms",
                "game inactive",
                "game close",
                "scores active",
                "scores tick 17ms",
            ]
        );
    }

    #[test]
    fn test_exit_closes_top_down() {
        let trace = Trace::default();
        let mut runtime = Runtime::new();
        let mut stack = ScreenStack::new(Probe::boxed("a", &trace));
        stack.init(&mut runtime);
        stack.apply(&mut runtime, ScreenTransition::Push(Probe::boxed("b", &trace)));
        trace.take();

        stack.apply(&mut runtime, ScreenTransition::Exit);

        assert_eq!(trace.take(), ["b inactive", "b close", "a inactive", "a close"]);
        assert!(stack.should_exit());
    }

    #[test]
    fn test_popping_last_screen_exits() {
        let trace = Trace::default();
        let mut runtime = Runtime::new();
        let mut stack = ScreenStack::new(Probe::boxed("only", &trace));
        stack.init(&mut runtime);
        stack.apply(&mut runtime, ScreenTransition::Pop);
        assert!(stack.should_exit());
    }

    #[test]
    fn test_key_release_is_ignored() {
        let trace = Trace::default();
        let mut runtime = Runtime::new();
        let mut stack = ScreenStack::new(Probe::boxed("game", &trace));
        stack.init(&mut runtime);
        trace.take();

        let release = KeyEvent::new_with_kind(
            KeyCode::Char('x'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        stack.handle_event(&mut runtime, Event::Key(release));
        stack.handle_event(&mut runtime, Event::Resize(80, 24));

        assert!(trace.take().is_empty());
    }
}
