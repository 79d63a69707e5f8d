/// The element types the converter knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind<'a> {
    Svg,
    G,
    Path,
    Circle,
    Ellipse,
    Line,
    Rect,
    Polygon,
    Polyline,
    Text,
    Defs,
    Use,
    ClipPath,
    Mask,
    LinearGradient,
    RadialGradient,
    Pattern,
    /// `title`, `desc` and `metadata`: no visual meaning, skipped without a warning.
    Metadata,
    Unsupported(&'a str),
}

impl<'a> ElementKind<'a> {
    pub fn of(name: &'a str) -> Self {
        match name {
            "svg" => Self::Svg,
            "g" => Self::G,
            "path" => Self::Path,
            "circle" => Self::Circle,
            "ellipse" => Self::Ellipse,
            "line" => Self::Line,
            "rect" => Self::Rect,
            "polygon" => Self::Polygon,
            "polyline" => Self::Polyline,
            "text" => Self::Text,
            "defs" => Self::Defs,
            "use" => Self::Use,
            "clipPath" => Self::ClipPath,
            "mask" => Self::Mask,
            "linearGradient" => Self::LinearGradient,
            "radialGradient" => Self::RadialGradient,
            "pattern" => Self::Pattern,
            "title" | "desc" | "metadata" => Self::Metadata,
            other => Self::Unsupported(other),
        }
    }

    /// Elements a `<defs>` block converts (to populate the registry) instead of only registering.
    pub fn is_definition_source(self) -> bool {
        matches!(
            self,
            Self::LinearGradient | Self::RadialGradient | Self::Pattern | Self::Defs | Self::Mask
        )
    }
}
