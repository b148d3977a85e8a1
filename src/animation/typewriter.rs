use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    task::Poll,
};

use log::debug;

use super::FrameSource;

/// Minimum milliseconds between two revealed characters unless told otherwise.
pub const DEFAULT_INTERVAL_MS: f64 = 20.0;

/// Storage the revealed characters are appended to.
pub trait TextSink {
    fn append(&mut self, ch: char);
}

impl TextSink for String {
    fn append(&mut self, ch: char) {
        self.push(ch);
    }
}

impl TextSink for &RefCell<String> {
    fn append(&mut self, ch: char) {
        self.borrow_mut().push(ch);
    }
}

impl TextSink for Rc<RefCell<String>> {
    fn append(&mut self, ch: char) {
        self.borrow_mut().push(ch);
    }
}

/// Handle to abandon a running reveal. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    Completed,
    Cancelled,
}

/// Reveals a text one character per tick at most, with at least `interval_ms` between two reveals.
#[derive(Debug, Clone)]
pub struct Typewriter {
    chars:          Vec<char>,
    cursor:         usize,
    last_reveal_ms: f64,
    interval_ms:    f64,
    outcome:        Option<RevealOutcome>,
    cancel:         CancelToken,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self::with_interval(text, DEFAULT_INTERVAL_MS)
    }

    pub fn with_interval(text: &str, interval_ms: f64) -> Self {
        Self {
            chars: text.chars().collect(),
            cursor: 0,
            last_reveal_ms: 0.0,
            interval_ms,
            outcome: None,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Number of characters revealed so far.
    pub fn revealed(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn outcome(&self) -> Option<RevealOutcome> {
        self.outcome
    }

    /// Advances the reveal for a frame at `now_ms`. Ready once the whole text is in the sink or the reveal was cancelled;
    /// further ticks keep returning the same outcome without touching the sink.
    pub fn on_tick(&mut self, now_ms: f64, sink: &mut impl TextSink) -> Poll<RevealOutcome> {
        if let Some(outcome) = self.outcome {
            return Poll::Ready(outcome);
        }
        if self.cancel.is_cancelled() {
            return self.finish(RevealOutcome::Cancelled);
        }

        if self.cursor < self.chars.len() && now_ms - self.last_reveal_ms >= self.interval_ms {
            sink.append(self.chars[self.cursor]);
            self.cursor += 1;
            self.last_reveal_ms = now_ms;
        }

        if self.cursor >= self.chars.len() {
            return self.finish(RevealOutcome::Completed);
        }
        Poll::Pending
    }

    fn finish(&mut self, outcome: RevealOutcome) -> Poll<RevealOutcome> {
        debug!("Reveal {:?} after {} of {} characters", outcome, self.cursor, self.chars.len());
        self.outcome = Some(outcome);
        Poll::Ready(outcome)
    }
}

/// Types `text` into `sink` driven by frames of `frames`, resolving once the text is fully revealed or `cancel` fired.
pub async fn reveal<F: FrameSource>(
    text: &str,
    mut sink: impl TextSink,
    interval_ms: f64,
    frames: &mut F,
    cancel: CancelToken,
) -> RevealOutcome {
    let mut typewriter = Typewriter::with_interval(text, interval_ms).with_cancel(cancel);
    loop {
        let now_ms = frames.next_frame().await;
        if let Poll::Ready(outcome) = typewriter.on_tick(now_ms, &mut sink) {
            return outcome;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        future::{poll_fn, Future},
        pin::pin,
    };

    use super::*;
    use crate::animation::FixedStepFrames;

    const FRAME_MS: f64 = 16.0;

    /// Ticks until ready, returns the outcome and how many ticks it took.
    fn run(typewriter: &mut Typewriter, sink: &mut String, start_ms: f64) -> (RevealOutcome, usize) {
        let mut now = start_ms;
        for ticks in 1..100_000 {
            if let Poll::Ready(outcome) = typewriter.on_tick(now, sink) {
                return (outcome, ticks);
            }
            now += FRAME_MS;
        }
        panic!("reveal never finished");
    }

    #[test]
    fn reveals_whole_text_in_order() {
        for text in ["Hello, world!", "a", "ünïcødé ✓ 漢字", "  spaced  out  "] {
            let mut sink = String::new();
            let (outcome, _) = run(&mut Typewriter::new(text), &mut sink, FRAME_MS);
            assert_eq!(outcome, RevealOutcome::Completed);
            assert_eq!(sink, text);
        }
    }

    #[test]
    fn appends_to_existing_content() {
        let mut sink = String::from("> ");
        run(&mut Typewriter::new("ok"), &mut sink, FRAME_MS);
        assert_eq!(sink, "> ok");
    }

    #[test]
    fn empty_text_completes_on_first_tick() {
        let mut sink = String::new();
        let (outcome, ticks) = run(&mut Typewriter::new(""), &mut sink, 0.0);
        assert_eq!((outcome, ticks), (RevealOutcome::Completed, 1));
        assert!(sink.is_empty());
    }

    #[test]
    fn completes_in_the_tick_revealing_last_character() {
        let mut typewriter = Typewriter::new("AB");
        let mut sink = String::new();
        assert_eq!(typewriter.on_tick(100.0, &mut sink), Poll::Pending);
        assert_eq!(typewriter.on_tick(200.0, &mut sink), Poll::Ready(RevealOutcome::Completed));
        assert_eq!(sink, "AB");

        // finished reveal is inert
        assert_eq!(typewriter.on_tick(300.0, &mut sink), Poll::Ready(RevealOutcome::Completed));
        assert_eq!(sink, "AB");
    }

    #[test]
    fn at_most_one_character_per_tick() {
        let mut typewriter = Typewriter::with_interval("ABCDEF", 1.0);
        let mut sink = String::new();
        typewriter.on_tick(1000.0, &mut sink);
        assert_eq!(sink, "A");
        typewriter.on_tick(5000.0, &mut sink);
        assert_eq!(sink, "AB");
    }

    #[test]
    fn interval_throttles_reveals() {
        let mut typewriter = Typewriter::with_interval("ABCDEF", 1000.0);
        let mut sink = String::new();

        // 100ms of 16ms frames right after a reveal
        assert_eq!(typewriter.on_tick(1000.0, &mut sink), Poll::Pending);
        assert_eq!(sink, "A");
        let mut now = 1000.0;
        while now < 1100.0 {
            now += FRAME_MS;
            typewriter.on_tick(now, &mut sink);
        }
        assert_eq!(sink, "A");

        // and the next reveal only once a full interval elapsed
        typewriter.on_tick(1999.0, &mut sink);
        assert_eq!(sink, "A");
        typewriter.on_tick(2000.0, &mut sink);
        assert_eq!(sink, "AB");
    }

    #[test]
    fn interval_shorter_than_frame_is_bound_by_frame_rate() {
        let mut typewriter = Typewriter::with_interval("ABCDEFGHIJ", 1.0);
        let mut sink = String::new();
        let (_, ticks) = run(&mut typewriter, &mut sink, FRAME_MS);
        assert_eq!(ticks, 10);
    }

    #[test]
    fn interleaved_reveals_do_not_mix() {
        let mut first = Typewriter::new("AB");
        let mut second = Typewriter::new("CD");
        let (mut sink1, mut sink2) = (String::new(), String::new());

        let mut now = FRAME_MS;
        let mut done = (false, false);
        while done != (true, true) {
            // second one runs on odd frames only
            done.0 |= first.on_tick(now, &mut sink1).is_ready();
            if (now / FRAME_MS) as u64 % 2 == 1 {
                done.1 |= second.on_tick(now, &mut sink2).is_ready();
            }
            now += FRAME_MS;
        }

        assert_eq!(sink1, "AB");
        assert_eq!(sink2, "CD");
    }

    #[test]
    fn cancelled_reveal_stops_on_next_tick() {
        let mut typewriter = Typewriter::new("Hello");
        let cancel = typewriter.cancel_token();
        let mut sink = String::new();

        typewriter.on_tick(100.0, &mut sink);
        typewriter.on_tick(200.0, &mut sink);
        cancel.cancel();

        assert_eq!(typewriter.on_tick(300.0, &mut sink), Poll::Ready(RevealOutcome::Cancelled));
        assert_eq!(typewriter.on_tick(400.0, &mut sink), Poll::Ready(RevealOutcome::Cancelled));
        assert_eq!(sink, "He");
        assert_eq!(typewriter.outcome(), Some(RevealOutcome::Cancelled));
    }

    #[test]
    fn async_reveal_fills_shared_sink() {
        let sink = RefCell::new(String::new());
        let mut frames = FixedStepFrames::new(FRAME_MS);

        let outcome = pollster::block_on(reveal("typed", &sink, DEFAULT_INTERVAL_MS, &mut frames, CancelToken::new()));

        assert_eq!(outcome, RevealOutcome::Completed);
        assert_eq!(*sink.borrow(), "typed");
    }

    /// Frames that suspend once before resolving, so a reveal yields to the executor every frame.
    struct YieldingFrames {
        now_ms: f64,
    }

    impl FrameSource for YieldingFrames {
        fn next_frame(&mut self) -> impl Future<Output = f64> {
            self.now_ms += FRAME_MS;
            let now_ms = self.now_ms;
            let mut yielded = false;
            poll_fn(move |cx| {
                if yielded {
                    return Poll::Ready(now_ms);
                }
                yielded = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            })
        }
    }

    #[test]
    fn concurrent_async_reveals_have_independent_cursors() {
        let sink1 = Rc::new(RefCell::new(String::new()));
        let sink2 = Rc::new(RefCell::new(String::new()));
        let (mut frames1, mut frames2) = (YieldingFrames { now_ms: 0.0 }, YieldingFrames { now_ms: 0.0 });

        let mut first = pin!(reveal("AB", sink1.clone(), DEFAULT_INTERVAL_MS, &mut frames1, CancelToken::new()));
        let mut second = pin!(reveal("CD", sink2.clone(), DEFAULT_INTERVAL_MS, &mut frames2, CancelToken::new()));

        // both polled in alternation on one executor, recording whether they were ever half done together
        let mut outcomes = (None, None);
        let mut overlapped = false;
        pollster::block_on(poll_fn(|cx| {
            if outcomes.0.is_none() {
                if let Poll::Ready(outcome) = first.as_mut().poll(cx) {
                    outcomes.0 = Some(outcome);
                }
            }
            if outcomes.1.is_none() {
                if let Poll::Ready(outcome) = second.as_mut().poll(cx) {
                    outcomes.1 = Some(outcome);
                }
            }
            overlapped |= sink1.borrow().len() == 1 && sink2.borrow().len() == 1;
            match outcomes {
                (Some(_), Some(_)) => Poll::Ready(()),
                _ => Poll::Pending,
            }
        }));

        assert_eq!(outcomes, (Some(RevealOutcome::Completed), Some(RevealOutcome::Completed)));
        assert!(overlapped);
        assert_eq!(*sink1.borrow(), "AB");
        assert_eq!(*sink2.borrow(), "CD");
    }

    #[test]
    fn async_reveal_can_be_cancelled_upfront() {
        let sink = RefCell::new(String::new());
        let cancel = CancelToken::new();
        cancel.cancel();

        let outcome = pollster::block_on(reveal("never", &sink, DEFAULT_INTERVAL_MS, &mut FixedStepFrames::new(FRAME_MS), cancel));

        assert_eq!(outcome, RevealOutcome::Cancelled);
        assert!(sink.borrow().is_empty());
    }
}
