use crate::{Orientation, WidgetSettings, Width};

/// Page-space box of an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub height: f64,
    pub scroll_top: f64,
}

/// Where to put the suggestion container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub top: f64,
    pub left: f64,
    /// Set only for `Width::Auto`, which tracks the input.
    pub width: Option<f64>,
    /// The side actually chosen; never `Auto`.
    pub orientation: Orientation,
}

/// Position the container next to `input`.
///
/// Returns None when the container lives under a custom parent and
/// `force_fix_position` is off: the host's own layout wins then.
/// `parent_offset` is the offset of the container's positioned parent when
/// that parent is not the document body.
pub fn fix_position(
    settings: &WidgetSettings,
    input: Rect,
    container_height: f64,
    viewport: Viewport,
    parent_offset: Option<(f64, f64)>,
) -> Option<Placement> {
    if settings.append_to.is_some() && !settings.force_fix_position {
        return None;
    }

    let orientation = match settings.orientation {
        Orientation::Auto => {
            let top_overflow = -viewport.scroll_top + input.top - container_height;
            let bottom_overflow =
                viewport.scroll_top + viewport.height - (input.top + input.height + container_height);
            if top_overflow >= bottom_overflow {
                Orientation::Top
            } else {
                Orientation::Bottom
            }
        }
        fixed => fixed,
    };

    let mut top = input.top;
    let mut left = input.left;
    if orientation == Orientation::Top {
        top -= container_height;
    } else {
        top += input.height;
    }
    if let Some((parent_top, parent_left)) = parent_offset {
        top -= parent_top;
        left -= parent_left;
    }

    Some(Placement {
        top,
        left,
        width: (settings.width == Width::Auto).then_some(input.width),
        orientation,
    })
}

/// Width to apply before showing the list. None leaves it unset.
pub fn container_width(width: Width, input_width: f64) -> Option<f64> {
    match width {
        Width::Auto if input_width > 0.0 => Some(input_width),
        Width::Auto => Some(300.0),
        Width::Flex => None,
        Width::Pixels(px) => Some(f64::from(px)),
    }
}

/// New scroll offset that brings a highlighted row into view, if it is out.
pub fn scroll_into_view(row_top: f64, row_height: f64, scroll_top: f64, max_height: f64) -> Option<f64> {
    let lower_bound = scroll_top + max_height - row_height;
    if row_top < scroll_top {
        Some(row_top)
    } else if row_top > lower_bound {
        Some(row_top - max_height + row_height)
    } else {
        None
    }
}
