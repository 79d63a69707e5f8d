use std::fmt;
use svg2ivg_core::number::js;
use svg2ivg_core::transform::{TransformOp, join_ops};

/// A tiled fill whose body was rendered once when the `<pattern>` was visited.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternSpec {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub relative: bool,
    pub transform: Vec<TransformOp>,
    /// Body statements joined with `; `.
    pub body: String,
}

impl fmt::Display for PatternSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pattern:[bounds 0,0,{},{}", js(self.width), js(self.height))?;
        if !self.body.is_empty() {
            write!(f, "; {}", self.body)?;
        }
        f.write_str("]")?;

        let mut ops = Vec::new();
        if self.x != 0.0 || self.y != 0.0 {
            ops.push(TransformOp::Offset {
                x: self.x,
                y: self.y,
            });
        }
        ops.extend(self.transform.iter().cloned());
        if !ops.is_empty() {
            write!(f, " transform:[{}]", join_ops(&ops))?;
        }
        if self.relative {
            f.write_str(" relative:yes")?;
        }
        Ok(())
    }
}
