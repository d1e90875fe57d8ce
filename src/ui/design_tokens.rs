// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

Visual constants shared by the toast cards and the demo window.

## Organization

- **Palette**: Base colors, including one accent per toast kind
- **Opacity**: Standardized opacity levels
- **Spacing**: Spacing scale (4px grid)
- **Sizing**: Icon and button sizes
- **Typography**: Font size scale
- **Border**, **Radius**, **Shadow**: Card chrome

## Examples

```
use iced_toasts::ui::design_tokens::{palette, spacing, opacity};
use iced::Color;

let muted_error = Color {
    a: opacity::OVERLAY_SUBTLE,
    ..palette::ERROR_500
};

let padding = spacing::MD; // 16px
```
"#]

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Grayscale
    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_950: Color = Color::from_rgb(0.04, 0.04, 0.04);
    pub const GRAY_700: Color = Color::from_rgb(0.3, 0.3, 0.3);
    pub const GRAY_200: Color = Color::from_rgb(0.75, 0.75, 0.75);
    pub const GRAY_100: Color = Color::from_rgb(0.93, 0.93, 0.93);

    // Brand colors (blue scale)
    pub const PRIMARY_400: Color = Color::from_rgb(0.4, 0.7, 1.0);

    // Semantic colors
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const WARNING_500: Color = Color::from_rgb(0.945, 0.651, 0.125);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
    pub const INFO_500: Color = Color::from_rgb(0.392, 0.588, 1.0);

    // Rich-color backgrounds (light / dark)
    pub const ERROR_BG_LIGHT: Color = Color::from_rgb(1.0, 0.92, 0.92);
    pub const ERROR_BG_DARK: Color = Color::from_rgb(0.18, 0.02, 0.02);
    pub const WARNING_BG_LIGHT: Color = Color::from_rgb(1.0, 0.98, 0.9);
    pub const WARNING_BG_DARK: Color = Color::from_rgb(0.11, 0.08, 0.0);
    pub const SUCCESS_BG_LIGHT: Color = Color::from_rgb(0.93, 1.0, 0.95);
    pub const SUCCESS_BG_DARK: Color = Color::from_rgb(0.0, 0.09, 0.03);
    pub const INFO_BG_LIGHT: Color = Color::from_rgb(0.94, 0.97, 1.0);
    pub const INFO_BG_DARK: Color = Color::from_rgb(0.0, 0.06, 0.13);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    /// Cards stacked behind the front one when collapsed.
    pub const STACKED: f32 = 0.85;
    pub const OPAQUE: f32 = 1.0;
}

// ============================================================================
// Spacing Scale
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    pub const ICON_SM: f32 = 16.0;
    pub const ICON_MD: f32 = 20.0;

    /// Height of a collapsed card peeking out behind the front one.
    pub const STACK_PEEK: f32 = 6.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// Toast title
    pub const BODY: f32 = 14.0;

    /// Toast description
    pub const BODY_SM: f32 = 13.0;

    /// Action and cancel buttons
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Border Scale
// ============================================================================

pub mod border {
    pub const WIDTH_SM: f32 = 1.0;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const FULL: f32 = 9999.0; // Pill shape
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Color, Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const MD: Shadow = Shadow {
        color: Color {
            a: 0.1,
            ..palette::BLACK
        },
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 12.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::STACKED > opacity::OVERLAY_MEDIUM && opacity::STACKED < 1.0);

    assert!(sizing::ICON_MD > sizing::ICON_SM);
    assert!(typography::BODY > typography::BODY_SM);
    assert!(typography::BODY_SM > typography::CAPTION);
    assert!(border::WIDTH_SM > 0.0);
};
