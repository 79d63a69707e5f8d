pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Malformed markup at byte {offset}: {message}")]
    MalformedMarkup { offset: usize, message: String },

    #[error("Missing required attribute '{attribute}' on <{element}>")]
    MissingRequiredAttribute { element: String, attribute: String },

    #[error("Invalid unit: {value}")]
    InvalidUnit { value: String },

    #[error("Invalid number: {value}")]
    InvalidNumber { value: String },

    #[error("Invalid opacity: {value}")]
    InvalidOpacity { value: String },

    #[error("Invalid rect: {value}")]
    InvalidRect { value: String },

    #[error("Invalid points: {value}")]
    InvalidPoints { value: String },

    #[error("Unrecognized color: {value}")]
    UnrecognizedColor { value: String },

    #[error("Unrecognized paint reference: {value}")]
    UnrecognizedPaintReference { value: String },

    #[error("Unrecognized mask paint reference: {value}")]
    UnrecognizedMaskPaint { value: String },

    #[error("Unrecognized fill-rule: {value}")]
    UnrecognizedFillRule { value: String },

    #[error("Unrecognized stroke-linejoin: {value}")]
    UnrecognizedLineJoin { value: String },

    #[error("Unrecognized stroke-linecap: {value}")]
    UnrecognizedLineCap { value: String },

    #[error("Invalid default dimensions: {value}")]
    InvalidDefaultSize { value: String },
}

impl Error {
    pub(crate) fn malformed(offset: usize, message: impl Into<String>) -> Self {
        Self::MalformedMarkup {
            offset,
            message: message.into(),
        }
    }
}
