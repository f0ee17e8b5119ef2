// testing.rs - In-memory hosts for running the engine without a browser
//
// Used by the unit tests and by tests/. Handles are cheap clones sharing
// one state, so a test can keep a copy after moving one into the engine.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::render::Surface;
use crate::sim::{FrameCallback, FrameHandle, FrameScheduler, Viewport};
use crate::ui::{Dom, TimerCallback, TimerHandle, Timers};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Clear(f64, f64, f64, f64),
    BeginPath,
    Arc { x: f64, y: f64, r: f64 },
    FillColor(String),
    Fill,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    StrokeColor(String),
    LineWidth(f64),
    Stroke,
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub size: (u32, u32),
    pub ops: Vec<Op>,
}

impl RecordingSurface {
    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    /// Ops since the last clear.
    pub fn last_frame(&self) -> &[Op] {
        let start = self.ops.iter().rposition(|op| matches!(op, Op::Clear(..))).unwrap_or(0);
        &self.ops[start..]
    }
}

impl Surface for RecordingSurface {
    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(Op::Clear(x, y, w, h));
    }
    fn begin_path(&mut self) {
        self.ops.push(Op::BeginPath);
    }
    fn arc(&mut self, x: f64, y: f64, r: f64, _start: f64, _end: f64) {
        self.ops.push(Op::Arc { x, y, r });
    }
    fn set_fill_color(&mut self, color: &str) {
        self.ops.push(Op::FillColor(color.to_string()));
    }
    fn fill(&mut self) {
        self.ops.push(Op::Fill);
    }
    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::MoveTo(x, y));
    }
    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::LineTo(x, y));
    }
    fn set_stroke_color(&mut self, color: &str) {
        self.ops.push(Op::StrokeColor(color.to_string()));
    }
    fn set_line_width(&mut self, width: f64) {
        self.ops.push(Op::LineWidth(width));
    }
    fn stroke(&mut self) {
        self.ops.push(Op::Stroke);
    }
}

#[derive(Debug, Clone)]
pub struct FixedViewport(Rc<Cell<(u32, u32)>>);

impl FixedViewport {
    pub fn new(w: u32, h: u32) -> Self {
        Self(Rc::new(Cell::new((w, h))))
    }

    pub fn set(&self, w: u32, h: u32) {
        self.0.set((w, h));
    }
}

impl Viewport for FixedViewport {
    fn size(&self) -> (u32, u32) {
        self.0.get()
    }
}

/// FIFO of callbacks keyed by handle, fired only when the test says so.
struct Queue<C> {
    next: i32,
    items: VecDeque<(i32, C, i32)>,
}

impl<C> Default for Queue<C> {
    fn default() -> Self {
        Self { next: 1, items: VecDeque::new() }
    }
}

impl<C> Queue<C> {
    fn push(&mut self, callback: C, tag: i32) -> i32 {
        let id = self.next;
        self.next += 1;
        self.items.push_back((id, callback, tag));
        id
    }

    fn remove(&mut self, id: i32) {
        self.items.retain(|(i, _, _)| *i != id);
    }
}

/// Frame scheduler that only advances on `run_next`.
#[derive(Clone, Default)]
pub struct ManualFrames {
    queue: Rc<RefCell<Queue<FrameCallback>>>,
    fail: Rc<Cell<bool>>,
}

impl ManualFrames {
    pub fn pending(&self) -> usize {
        self.queue.borrow().items.len()
    }

    /// Make every later `schedule_frame` fail.
    pub fn fail_scheduling(&self) {
        self.fail.set(true);
    }

    /// Fire the oldest frame. Frames it schedules wait for the next call.
    pub fn run_next(&self) -> bool {
        let item = self.queue.borrow_mut().items.pop_front();
        match item {
            Some((_, callback, _)) => {
                callback();
                true
            }
            None => false,
        }
    }

    /// Fire the frames pending right now.
    pub fn run_all(&self) {
        for _ in 0..self.pending() {
            self.run_next();
        }
    }
}

impl FrameScheduler for ManualFrames {
    fn schedule_frame(&self, callback: FrameCallback) -> Result<FrameHandle> {
        if self.fail.get() {
            return Err(Error::Js("requestAnimationFrame unavailable".into()));
        }
        Ok(FrameHandle(self.queue.borrow_mut().push(callback, 0)))
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.queue.borrow_mut().remove(handle.0);
    }
}

/// Timeouts that fire only when the test says so, in scheduling order.
#[derive(Clone, Default)]
pub struct ManualTimers {
    queue: Rc<RefCell<Queue<TimerCallback>>>,
}

impl ManualTimers {
    pub fn pending(&self) -> usize {
        self.queue.borrow().items.len()
    }

    pub fn pending_delays(&self) -> Vec<i32> {
        self.queue.borrow().items.iter().map(|(_, _, delay)| *delay).collect()
    }

    pub fn run_all(&self) {
        loop {
            let item = self.queue.borrow_mut().items.pop_front();
            match item {
                Some((_, callback, _)) => callback(),
                None => break,
            }
        }
    }
}

impl Timers for ManualTimers {
    fn set_timeout(&self, callback: TimerCallback, delay_ms: i32) -> Result<TimerHandle> {
        Ok(TimerHandle(self.queue.borrow_mut().push(callback, delay_ms)))
    }

    fn clear_timeout(&self, handle: TimerHandle) {
        self.queue.borrow_mut().remove(handle.0);
    }
}

#[derive(Debug, Default)]
struct FakeElement {
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    reflows: u32,
}

#[derive(Debug, Default)]
struct FakeDocument {
    elements: HashMap<String, FakeElement>,
    scroll_locked: bool,
    scrolls: u32,
}

/// Id-addressed document with class lists and attributes.
#[derive(Debug, Clone, Default)]
pub struct FakeDom(Rc<RefCell<FakeDocument>>);

impl FakeDom {
    pub fn insert(&self, id: &str, classes: &[&str]) {
        let element = FakeElement {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..FakeElement::default()
        };
        self.0.borrow_mut().elements.insert(id.to_string(), element);
    }

    /// Class set of `id`; empty if there is no such element.
    pub fn classes(&self, id: &str) -> BTreeSet<String> {
        self.0.borrow().elements.get(id).map(|e| e.classes.clone()).unwrap_or_default()
    }

    pub fn attribute(&self, id: &str, name: &str) -> Option<String> {
        self.0.borrow().elements.get(id)?.attributes.get(name).cloned()
    }

    pub fn reflows(&self, id: &str) -> u32 {
        self.0.borrow().elements.get(id).map_or(0, |e| e.reflows)
    }

    pub fn scroll_locked(&self) -> bool {
        self.0.borrow().scroll_locked
    }

    pub fn scrolls(&self) -> u32 {
        self.0.borrow().scrolls
    }

    fn with<R>(&self, id: &str, f: impl FnOnce(&mut FakeElement) -> R) -> Result<R> {
        let mut doc = self.0.borrow_mut();
        let element = doc
            .elements
            .get_mut(id)
            .ok_or_else(|| Error::MissingElement(id.to_string()))?;
        Ok(f(element))
    }
}

impl Dom for FakeDom {
    fn has_element(&self, id: &str) -> bool {
        self.0.borrow().elements.contains_key(id)
    }

    fn add_class(&self, id: &str, class: &str) -> Result<()> {
        self.with(id, |e| {
            e.classes.insert(class.to_string());
        })
    }

    fn remove_class(&self, id: &str, class: &str) -> Result<()> {
        self.with(id, |e| {
            e.classes.remove(class);
        })
    }

    fn replace_class(&self, id: &str, from: &str, to: &str) -> Result<()> {
        self.with(id, |e| {
            if e.classes.remove(from) {
                e.classes.insert(to.to_string());
            }
        })
    }

    fn set_attribute(&self, id: &str, name: &str, value: &str) -> Result<()> {
        self.with(id, |e| {
            e.attributes.insert(name.to_string(), value.to_string());
        })
    }

    fn force_reflow(&self, id: &str) -> Result<()> {
        self.with(id, |e| e.reflows += 1)
    }

    fn set_scroll_locked(&self, locked: bool) -> Result<()> {
        self.0.borrow_mut().scroll_locked = locked;
        Ok(())
    }

    fn scroll_to_top(&self) {
        self.0.borrow_mut().scrolls += 1;
    }
}

/// Run `f` with a fmt subscriber writing into a buffer; returns what it logged.
pub fn capture_logs(f: impl FnOnce()) -> String {
    let buf = LogBuffer::default();
    let sink = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .without_time()
        .with_target(false)
        .with_writer(move || sink.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    buf.text()
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn text(&self) -> String {
        let bytes = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if let Ok(mut buf) = self.0.lock() {
            buf.extend_from_slice(data);
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
