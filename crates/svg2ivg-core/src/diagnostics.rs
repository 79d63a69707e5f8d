//! Non-fatal conversion diagnostics.
//!
//! Warnings never stop a conversion: they record that something was skipped or that a default
//! was substituted. Each one is logged through `tracing` as it is recorded and also kept in
//! order so embedding callers can inspect them without installing a subscriber.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Use,
    ClipPath,
    Mask,
}

impl ReferenceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Use => "use",
            Self::ClipPath => "clip-path",
            Self::Mask => "mask",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// A root element without `width`/`height`; the configured default was used.
    MissingDimension { attribute: &'static str, assumed: f64 },
    UnsupportedUnit { unit: String },
    UnsupportedTransform { name: String },
    MatrixArity { count: usize },
    TooManyDashValues { value: String },
    UnresolvedReference { kind: ReferenceKind, reference: String },
    MissingAttribute { element: String, attribute: &'static str },
    NotEnoughPoints { element: String },
    UnsupportedElement { name: String },
    UnsupportedTextChild { name: String },
    /// Object-bounding-box units on an element whose bounds are unknown.
    MissingBounds { attribute: &'static str },
    RecursiveReference { reference: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDimension { attribute, assumed } => write!(
                f,
                "Missing '{attribute}' attribute. Assuming a {attribute} of {}.",
                crate::number::js(*assumed)
            ),
            Self::UnsupportedUnit { unit } => write!(f, "Unsupported unit: {unit}"),
            Self::UnsupportedTransform { name } => write!(f, "Unsupported transform: {name}"),
            Self::MatrixArity { count } => {
                write!(f, "matrix requires 6 parameters (got {count})")
            }
            Self::TooManyDashValues { value } => {
                write!(f, "Too many dash values in '{value}'; using first two")
            }
            Self::UnresolvedReference { kind, reference } => {
                write!(f, "Unrecognized {} reference: {reference}", kind.as_str())
            }
            Self::MissingAttribute { element, attribute } => {
                write!(f, "Missing '{attribute}' attribute in '{element}' element.")
            }
            Self::NotEnoughPoints { element } => write!(f, "Not enough points in '{element}'."),
            Self::UnsupportedElement { name } => write!(f, "Can't convert type: {name}"),
            Self::UnsupportedTextChild { name } => {
                write!(f, "Unsupported nested element in text: {name}")
            }
            Self::MissingBounds { attribute } => {
                write!(f, "{attribute}=\"objectBoundingBox\" requires known bounds")
            }
            Self::RecursiveReference { reference } => {
                write!(f, "Recursive use reference: {reference}")
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
