use inspecta_types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderStyle {
    None,
    Single,
}

impl BorderStyle {
    /// The `w:val` keyword for this style.
    pub fn keyword(&self) -> &'static str {
        match self {
            BorderStyle::None => "nil",
            BorderStyle::Single => "single",
        }
    }
}

/// A border stroke. `size` is in eighths of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Border {
    pub style: BorderStyle,
    pub size: u32,
    pub color: Color,
}

impl Border {
    pub const NONE: Border = Border {
        style: BorderStyle::None,
        size: 0,
        color: Color::BLACK,
    };

    pub fn single(size: u32, color: Color) -> Self {
        Self {
            style: BorderStyle::Single,
            size,
            color,
        }
    }
}

/// The six table border edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableBorders {
    pub top: Border,
    pub left: Border,
    pub bottom: Border,
    pub right: Border,
    pub inside_h: Border,
    pub inside_v: Border,
}

impl TableBorders {
    pub fn all(border: Border) -> Self {
        Self {
            top: border,
            left: border,
            bottom: border,
            right: border,
            inside_h: border,
            inside_v: border,
        }
    }

    pub fn none() -> Self {
        Self::all(Border::NONE)
    }

    /// Named edges in the order the markup requires them.
    pub fn edges(&self) -> [(&'static str, Border); 6] {
        [
            ("top", self.top),
            ("left", self.left),
            ("bottom", self.bottom),
            ("right", self.right),
            ("insideH", self.inside_h),
            ("insideV", self.inside_v),
        ]
    }
}

impl Default for TableBorders {
    fn default() -> Self {
        Self::all(Border::single(4, Color::BLACK))
    }
}
