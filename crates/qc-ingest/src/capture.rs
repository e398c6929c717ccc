//! Capture window over printout lines.
//!
//! Readings are only trusted between the assayed-control header and the
//! next section header. The window is a small state machine that decides,
//! per line, whether the tokenizer should see it.

/// Header that opens the assayed-control section.
pub const DEFAULT_START_MARKER: &str = "LYPHOCHEK-ASSAYED";

/// Headers of the sections that follow the assayed-control block.
pub const DEFAULT_STOP_MARKERS: [&str; 3] =
    ["QC1 LIQUICHEK URINE", "INMUNOLOGY N1", "HBA1C QC N1"];

/// Start and stop markers, stored upper-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureMarkers {
    start: String,
    stops: Vec<String>,
}

impl CaptureMarkers {
    /// Builds a marker set. Blank stop markers are ignored.
    pub fn new<I, S>(start: &str, stops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            start: start.trim().to_uppercase(),
            stops: stops
                .into_iter()
                .map(|stop| stop.as_ref().trim().to_uppercase())
                .filter(|stop| !stop.is_empty())
                .collect(),
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn stops(&self) -> &[String] {
        &self.stops
    }

    fn opens(&self, upper_line: &str) -> bool {
        !self.start.is_empty() && upper_line.contains(&self.start)
    }

    fn closes(&self, upper_line: &str) -> bool {
        self.stops.iter().any(|stop| upper_line.contains(stop.as_str()))
    }
}

impl Default for CaptureMarkers {
    fn default() -> Self {
        Self::new(DEFAULT_START_MARKER, DEFAULT_STOP_MARKERS)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WindowState {
    #[default]
    Idle,
    Capturing,
}

/// What the caller should do with a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAction {
    /// Outside the window.
    Skip,
    /// Start marker line; consumed.
    Open,
    /// Stop marker line; consumed.
    Close,
    /// Inside the window; tokenize it.
    Scan,
}

/// Per-file window tracker.
#[derive(Debug)]
pub struct CaptureWindow<'a> {
    markers: &'a CaptureMarkers,
    state: WindowState,
}

impl<'a> CaptureWindow<'a> {
    pub fn new(markers: &'a CaptureMarkers) -> Self {
        Self {
            markers,
            state: WindowState::Idle,
        }
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    /// Feeds one upper-cased line and returns its disposition.
    ///
    /// The start marker is honoured in either state; stop markers only
    /// matter while capturing.
    pub fn advance(&mut self, upper_line: &str) -> LineAction {
        if self.markers.opens(upper_line) {
            self.state = WindowState::Capturing;
            return LineAction::Open;
        }
        match self.state {
            WindowState::Capturing if self.markers.closes(upper_line) => {
                self.state = WindowState::Idle;
                LineAction::Close
            }
            WindowState::Capturing => LineAction::Scan,
            WindowState::Idle => LineAction::Skip,
        }
    }
}

/// Upper-cased lines that fall inside the capture window, in file order.
pub fn captured_lines<'a, S>(
    lines: &'a [S],
    markers: &'a CaptureMarkers,
) -> impl Iterator<Item = String> + 'a
where
    S: AsRef<str>,
{
    let mut window = CaptureWindow::new(markers);
    lines.iter().filter_map(move |line| {
        let upper = line.as_ref().to_uppercase();
        match window.advance(&upper) {
            LineAction::Scan => Some(upper),
            LineAction::Skip | LineAction::Open | LineAction::Close => None,
        }
    })
}
