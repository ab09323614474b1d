//! Serial-plotter text view.
//!
//! Renders one bank per line as `pin:value` pairs for interactive
//! terminals. Both views pad to the same column count with `N/A:0` so
//! a plotting terminal sees a constant number of traces when the
//! operator switches views.
//!
//! The view switch is a plain two-state enum driven by single-byte
//! console input (`0` selects buttons, `1` selects pots); the sampler
//! itself never consults it.

use core::fmt::Write as _;

use heapless::String;

use crate::console::Console;
use crate::sampler::Sampler;

/// Maximum rendered line length.
const LINE_CAP: usize = 256;

/// Which bank the plotter renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlotterView {
    Buttons,
    Pots,
}

impl PlotterView {
    /// Initial view for the given cardinalities: buttons if any exist,
    /// otherwise pots.
    #[must_use]
    pub const fn default_for(buttons: usize, _pots: usize) -> Self {
        if buttons > 0 {
            Self::Buttons
        } else {
            Self::Pots
        }
    }
}

/// Interactive view state for the serial-plotter mode.
pub struct Plotter {
    view: PlotterView,
}

impl Plotter {
    /// Create a plotter with the default view for the sampler's
    /// cardinalities.
    #[must_use]
    pub const fn new(buttons: usize, pots: usize) -> Self {
        Self {
            view: PlotterView::default_for(buttons, pots),
        }
    }

    /// The current view.
    #[inline]
    #[must_use]
    pub fn view(&self) -> PlotterView {
        self.view
    }

    /// Apply one byte of operator input: `0` selects the button view,
    /// `1` the pot view. Selections of an empty bank and unknown bytes
    /// are rejected with a console notice.
    pub fn handle_byte<C: Console>(
        &mut self,
        byte: u8,
        buttons: usize,
        pots: usize,
        console: &mut C,
    ) {
        match byte {
            b'0' if buttons > 0 => self.view = PlotterView::Buttons,
            b'0' => console.write_line("There are no buttons!"),
            b'1' if pots > 0 => self.view = PlotterView::Pots,
            b'1' => console.write_line("There are no potentiometers!"),
            _ => {
                console.write_line("Invalid input.");
                console.write_line("Enter 0 to print buttons or 1 to print potentiometers.");
            }
        }
    }

    /// Render one line of the current view.
    ///
    /// Reads the banks in place, so call this after `sample()` and
    /// before `emit_frame()` — emission drains the banks to zero.
    pub fn print<const B: usize, const P: usize, C: Console>(
        &self,
        sampler: &Sampler<B, P>,
        console: &mut C,
    ) {
        match self.view {
            PlotterView::Buttons => Self::print_buttons(sampler, console),
            PlotterView::Pots => Self::print_pots(sampler, console),
        }
    }

    fn print_buttons<const B: usize, const P: usize, C: Console>(
        sampler: &Sampler<B, P>,
        console: &mut C,
    ) {
        let bank = sampler.buttons();
        let mut line: String<LINE_CAP> = String::new();
        for i in 0..B {
            if i > 0 {
                let _ = line.push_str(", ");
            }
            let _ = write!(line, "{}:{}", bank.pins()[i], u8::from(bank.bit(i)));
        }
        Self::pad(&mut line, B, P);
        console.write_line(&line);
    }

    fn print_pots<const B: usize, const P: usize, C: Console>(
        sampler: &Sampler<B, P>,
        console: &mut C,
    ) {
        let bank = sampler.pots();
        let mut line: String<LINE_CAP> = String::new();
        for k in 0..P {
            if k > 0 {
                let _ = line.push_str(", ");
            }
            let _ = write!(line, "{}:{}", bank.pins()[k], bank.values()[k]);
        }
        Self::pad(&mut line, P, B);
        console.write_line(&line);
    }

    /// Pad a view of `shown` columns up to the other bank's count so
    /// the trace count never changes across view switches.
    fn pad(line: &mut String<LINE_CAP>, shown: usize, other: usize) {
        for i in shown..other {
            if i > 0 {
                let _ = line.push_str(", ");
            }
            let _ = line.push_str("N/A:0");
        }
    }
}
