use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Modules and their I/O points
// ────────────────────────────────────────────────────────────────────────────

/// One `<Module>` of the export with its enriched I/O points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// `ParentModule:PortAddress`, or the declared name for reserved hardware families.
    pub hardware_address: String,
    /// Declared module name; empty for reserved hardware families.
    pub hardware_comment: String,
    pub inputs: Vec<IoEntry>,
    pub outputs: Vec<IoEntry>,
}

impl ModuleRecord {
    /// A module contributes a group node only when it has any I/O point.
    pub fn has_io(&self) -> bool {
        !self.inputs.is_empty() || !self.outputs.is_empty()
    }

    pub fn entries(&self, direction: Direction) -> &[IoEntry] {
        match direction {
            Direction::Input => &self.inputs,
            Direction::Output => &self.outputs,
        }
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut IoEntry> {
        self.inputs.iter_mut().chain(self.outputs.iter_mut())
    }
}

/// A single wired I/O point.
///
/// `parameter_path` and `parameter_comment` use the empty string as the
/// "not found" sentinel. A comment is only ever set when a path is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoEntry {
    /// Module address + direction code + operand, e.g. `Local:1:I.Data.3`.
    pub hardware_address: String,
    pub hardware_comment: String,
    pub parameter_path: String,
    pub parameter_comment: String,
}

impl IoEntry {
    pub fn new(hardware_address: impl Into<String>, hardware_comment: impl Into<String>) -> Self {
        Self {
            hardware_address: hardware_address.into(),
            hardware_comment: hardware_comment.into(),
            ..Self::default()
        }
    }

    pub fn is_linked(&self) -> bool {
        !self.parameter_path.is_empty()
    }

    /// Values in display-column order.
    pub fn fields(&self) -> [String; 4] {
        [
            self.hardware_address.clone(),
            self.hardware_comment.clone(),
            self.parameter_path.clone(),
            self.parameter_comment.clone(),
        ]
    }
}

/// Direction of an I/O point, taken from the kind of tag container it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Input, Direction::Output];

    /// Label of the direction node in the tree.
    pub fn label(self) -> &'static str {
        match self {
            Direction::Input => "Inputs",
            Direction::Output => "Outputs",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Connection table
// ────────────────────────────────────────────────────────────────────────────

/// A `<ParameterConnection>` split into its hardware and program sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionEntry {
    /// Hardware-side literal, direction code already upper-cased.
    pub hardware: String,
    /// Program-scoped symbolic reference, e.g. `\Program.Tag`.
    pub parameter: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Summary
// ────────────────────────────────────────────────────────────────────────────

/// Counts reported per file by the `scan` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSummary {
    pub modules: usize,
    pub points: usize,
    pub linked: usize,
    pub described: usize,
}

impl LinkSummary {
    pub fn from_modules(modules: &[ModuleRecord]) -> Self {
        let mut summary = LinkSummary {
            modules: modules.len(),
            ..Self::default()
        };
        for entry in modules.iter().flat_map(|m| m.inputs.iter().chain(&m.outputs)) {
            summary.points += 1;
            if entry.is_linked() {
                summary.linked += 1;
            }
            if !entry.parameter_comment.is_empty() {
                summary.described += 1;
            }
        }
        summary
    }
}
