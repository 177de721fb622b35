//! Chart creation form: a `Closed`/`Open` state machine over a draft.
//!
//! Edits only apply while the form is open. Cancelling and successful
//! submission both close the form and reset the draft to a single blank
//! axis pair. Validation rejects incomplete input outright; blank pairs are
//! never dropped silently.

use crate::charts::{AxisTitles, ChartKind, DataPoint, NewChart};
use std::fmt;
use thiserror::Error;

/// Which axis of a pair (or which axis title) an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// One editable (x, y) row of the form. Either side may be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisPairDraft {
    /// X label.
    pub x: String,
    /// Y label.
    pub y: String,
}

impl AxisPairDraft {
    fn field_mut(&mut self, axis: Axis) -> &mut String {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }
}

/// Focusable form fields, in tab order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    /// Chart type selector.
    #[default]
    Kind,
    /// Data source text.
    DataSource,
    /// X axis title text.
    XTitle,
    /// Y axis title text.
    YTitle,
    /// One side of an axis pair.
    Pair(usize, Axis),
}

/// In-progress chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartDraft {
    /// Selected chart type.
    pub kind: ChartKind,
    /// Data source label.
    pub data_source: String,
    /// Axis titles (optional).
    pub axis_titles: AxisTitles,
    /// Axis pairs in order.
    pub pairs: Vec<AxisPairDraft>,
    /// Focused field.
    pub focus: FormField,
    /// Message from the last failed submission.
    pub error: Option<ValidationError>,
}

impl Default for ChartDraft {
    fn default() -> Self {
        Self {
            kind: ChartKind::default(),
            data_source: String::new(),
            axis_titles: AxisTitles::default(),
            pairs: vec![AxisPairDraft::default()],
            focus: FormField::default(),
            error: None,
        }
    }
}

impl ChartDraft {
    fn fields(&self) -> Vec<FormField> {
        let mut fields = vec![
            FormField::Kind,
            FormField::DataSource,
            FormField::XTitle,
            FormField::YTitle,
        ];
        for i in 0..self.pairs.len() {
            fields.push(FormField::Pair(i, Axis::X));
            fields.push(FormField::Pair(i, Axis::Y));
        }
        fields
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Kind => None,
            FormField::DataSource => Some(&mut self.data_source),
            FormField::XTitle => Some(&mut self.axis_titles.x),
            FormField::YTitle => Some(&mut self.axis_titles.y),
            FormField::Pair(i, axis) => self.pairs.get_mut(i).map(|p| p.field_mut(axis)),
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let fields = self.fields();
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let len = fields.len();
        let next = if forward {
            (pos + 1) % len
        } else {
            (pos + len - 1) % len
        };
        self.focus = fields[next];
    }

    fn clamp_focus(&mut self) {
        if let FormField::Pair(i, axis) = self.focus {
            self.focus = match self.pairs.len() {
                0 => FormField::YTitle,
                len if i >= len => FormField::Pair(len - 1, axis),
                _ => self.focus,
            };
        }
    }

    /// Checks the draft and converts it into a chart ready for registration.
    pub fn validate(&self) -> Result<NewChart, ValidationError> {
        let mut issues = Vec::new();
        if self.data_source.trim().is_empty() {
            issues.push(FieldIssue::BlankDataSource);
        }
        if self.pairs.is_empty() {
            issues.push(FieldIssue::NoAxisPairs);
        }
        for (index, pair) in self.pairs.iter().enumerate() {
            if pair.x.trim().is_empty() {
                issues.push(FieldIssue::BlankPairLabel {
                    index,
                    axis: Axis::X,
                });
            }
            if pair.y.trim().is_empty() {
                issues.push(FieldIssue::BlankPairLabel {
                    index,
                    axis: Axis::Y,
                });
            }
        }
        if !issues.is_empty() {
            return Err(ValidationError { issues });
        }

        Ok(NewChart {
            kind: self.kind,
            data_source: self.data_source.trim().to_string(),
            axis_titles: AxisTitles {
                x: self.axis_titles.x.trim().to_string(),
                y: self.axis_titles.y.trim().to_string(),
            },
            points: self
                .pairs
                .iter()
                .map(|p| DataPoint::new(p.x.trim(), p.y.trim()))
                .collect(),
        })
    }
}

/// A single reason a submission was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    /// The data source label is blank.
    BlankDataSource,
    /// Every axis pair was removed.
    NoAxisPairs,
    /// One side of an axis pair is blank.
    BlankPairLabel {
        /// Zero-based pair index.
        index: usize,
        /// Blank side.
        axis: Axis,
    },
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldIssue::BlankDataSource => f.write_str("data source is required"),
            FieldIssue::NoAxisPairs => f.write_str("add at least one data point"),
            FieldIssue::BlankPairLabel { index, axis } => {
                write!(f, "point {}: {} label is required", index + 1, axis)
            }
        }
    }
}

/// Submission rejected because required fields are blank.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_issues(.issues))]
pub struct ValidationError {
    /// Every problem found, in field order.
    pub issues: Vec<FieldIssue>,
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single edit applied to an open form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEdit {
    /// Select a chart type.
    SetKind(ChartKind),
    /// Step the chart type forward or backward.
    CycleKind {
        /// `true` for next, `false` for previous.
        forward: bool,
    },
    /// Replace the data source label.
    SetDataSource(String),
    /// Replace an axis title.
    SetAxisTitle(Axis, String),
    /// Replace one side of an axis pair.
    SetPair {
        /// Zero-based pair index.
        index: usize,
        /// Side to replace.
        axis: Axis,
        /// New text.
        value: String,
    },
    /// Append a blank pair and focus it.
    AddPair,
    /// Remove the pair at this index.
    RemovePair(usize),
    /// Focus a specific field.
    Focus(FormField),
    /// Focus the next field (wrapping).
    FocusNext,
    /// Focus the previous field (wrapping).
    FocusPrevious,
    /// Type a character into the focused field.
    InsertChar(char),
    /// Delete the last character of the focused field.
    Backspace,
}

/// Form visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormState {
    /// Not shown.
    #[default]
    Closed,
    /// Shown and accepting edits.
    Open,
}

/// The chart creation form.
#[derive(Debug, Clone, Default)]
pub struct ChartForm {
    state: FormState,
    draft: ChartDraft,
}

impl ChartForm {
    /// Creates a closed form with a fresh draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> FormState {
        self.state
    }

    /// Returns `true` while the form is open.
    pub fn is_open(&self) -> bool {
        self.state == FormState::Open
    }

    /// The draft (a fresh one while closed).
    pub fn draft(&self) -> &ChartDraft {
        &self.draft
    }

    /// `Closed -> Open`. Opening an already open form keeps its draft.
    pub fn open(&mut self) {
        self.state = FormState::Open;
    }

    /// `Open -> Closed`, discarding the draft.
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Applies an edit. Returns `false` when the form is closed or the edit
    /// targets something that does not exist.
    ///
    /// Any applied edit other than a focus move clears the message of the
    /// last rejected submission.
    pub fn apply(&mut self, edit: FormEdit) -> bool {
        if !self.is_open() {
            return false;
        }
        let edits_content = !matches!(
            edit,
            FormEdit::Focus(_) | FormEdit::FocusNext | FormEdit::FocusPrevious
        );
        let draft = &mut self.draft;
        match edit {
            FormEdit::SetKind(kind) => draft.kind = kind,
            FormEdit::CycleKind { forward } => {
                draft.kind = if forward {
                    draft.kind.next()
                } else {
                    draft.kind.previous()
                };
            }
            FormEdit::SetDataSource(value) => draft.data_source = value,
            FormEdit::SetAxisTitle(Axis::X, value) => draft.axis_titles.x = value,
            FormEdit::SetAxisTitle(Axis::Y, value) => draft.axis_titles.y = value,
            FormEdit::SetPair { index, axis, value } => match draft.pairs.get_mut(index) {
                Some(pair) => *pair.field_mut(axis) = value,
                None => return false,
            },
            FormEdit::AddPair => {
                draft.pairs.push(AxisPairDraft::default());
                draft.focus = FormField::Pair(draft.pairs.len() - 1, Axis::X);
            }
            FormEdit::RemovePair(index) => {
                if index >= draft.pairs.len() {
                    return false;
                }
                draft.pairs.remove(index);
                draft.clamp_focus();
            }
            FormEdit::Focus(field) => {
                if !draft.fields().contains(&field) {
                    return false;
                }
                draft.focus = field;
            }
            FormEdit::FocusNext => draft.move_focus(true),
            FormEdit::FocusPrevious => draft.move_focus(false),
            FormEdit::InsertChar(c) => match draft.text_mut(draft.focus) {
                Some(text) => text.push(c),
                None => return false,
            },
            FormEdit::Backspace => match draft.text_mut(draft.focus) {
                Some(text) => {
                    text.pop();
                }
                None => return false,
            },
        }
        if edits_content {
            draft.error = None;
        }
        true
    }

    /// Validates the draft without changing state.
    pub fn validate(&self) -> Result<NewChart, ValidationError> {
        self.draft.validate()
    }

    /// Records a failed submission; the form stays open.
    pub fn reject(&mut self, error: ValidationError) {
        tracing::debug!(%error, "chart form rejected");
        self.draft.error = Some(error);
    }

    /// Closes the form after a successful submission.
    pub fn complete(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.state = FormState::Closed;
        self.draft = ChartDraft::default();
    }
}
