//! Read-only diagnostics sink for buffer overlays.

use crate::raw::RawEntry;
use crate::sequence::SequenceEntry;
use crate::symbol::InputSymbol;

/// Receives a snapshot of controller state for debug overlays.
///
/// Every method has an empty default so sinks implement only what they draw.
pub trait BufferObserver {
    /// Raw buffer, oldest first.
    fn raw_buffer(&mut self, _entries: &[RawEntry]) {}

    /// Sequence buffer, oldest first, sentinels included.
    fn sequence_buffer(&mut self, _entries: &[SequenceEntry]) {}

    /// Last stick angle outside the deadzone and the last classified symbol.
    fn direction(&mut self, _angle: Option<f32>, _symbol: InputSymbol) {}
}

/// Formats buffers as compact text lines, one per buffer.
#[derive(Debug, Default, Clone)]
pub struct TextOverlay {
    /// Lines captured by the last report.
    pub lines: Vec<String>,
}

impl BufferObserver for TextOverlay {
    fn raw_buffer(&mut self, entries: &[RawEntry]) {
        let cells: Vec<String> = entries
            .iter()
            .map(|e| {
                if e.consumed {
                    format!("[{}]", e.symbol)
                } else {
                    e.symbol.to_string()
                }
            })
            .collect();
        self.lines.push(cells.join(" "));
    }

    fn sequence_buffer(&mut self, entries: &[SequenceEntry]) {
        let cells: Vec<String> = entries
            .iter()
            .map(|e| {
                if e.consumed {
                    format!("[{}]", e.id)
                } else {
                    e.id.to_string()
                }
            })
            .collect();
        self.lines.push(cells.join(" "));
    }

    fn direction(&mut self, angle: Option<f32>, symbol: InputSymbol) {
        match angle {
            Some(a) => self.lines.push(format!("{symbol} @ {a:.1}")),
            None => self.lines.push(format!("{symbol} @ neutral")),
        }
    }
}
