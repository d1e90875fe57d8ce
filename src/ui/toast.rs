// SPDX-License-Identifier: MPL-2.0
//! Iced rendering of the notification surface.
//!
//! Each position group becomes a fixed-width column anchored to its corner of
//! the window. Collapsed groups show the front card in full and a thin sliver
//! for each card behind it; expanded groups lay every visible card out with
//! the configured gap.

use crate::config::{TextDirection, ToasterConfig};
use crate::notifications::{
    CardLayout, HorizontalEdge, PositionGroup, Surface, Toast, ToastId, ToastKind, VerticalEdge,
};
use crate::ui::design_tokens::{border, opacity, radius, shadow, sizing, spacing, typography};
use crate::ui::theming::{rich_background, ColorScheme, ThemeVariant};
use iced::widget::{button, container, mouse_area, Column, Container, Row, Stack, Text};
use iced::{alignment, Color, Element, Length, Padding, Point, Theme, Vector};

/// Interaction reported by the rendered cards.
#[derive(Debug, Clone)]
pub enum Message {
    Close(ToastId),
    Action(ToastId),
    Cancel(ToastId),
    RegionEntered,
    RegionMoved,
    RegionLeft,
    Pressed { id: ToastId, dismissible: bool },
    Released(ToastId),
    PointerMoved(ToastId, Point),
}

/// Renders every non-empty position group of `surface`.
pub fn view_overlay<'a>(surface: &Surface) -> Element<'a, Message> {
    let state = surface.state();
    let config = surface.config();
    let variant = if config.invert {
        state.theme.inverted()
    } else {
        state.theme
    };
    let scheme = ColorScheme::for_variant(variant);

    let groups: Vec<Element<'a, Message>> = state
        .groups(config.position)
        .into_iter()
        .filter(|group| !group.toasts.is_empty())
        .map(|group| view_group(surface, &group, &scheme, variant))
        .collect();

    Stack::with_children(groups)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_group<'a>(
    surface: &Surface,
    group: &PositionGroup,
    scheme: &ColorScheme,
    variant: ThemeVariant,
) -> Element<'a, Message> {
    let config = surface.config();

    let mut cards: Vec<Element<'a, Message>> = Vec::new();
    let mut expanded = config.expand;
    for toast in &group.toasts {
        let Some(layout) = surface.layout(&toast.id) else {
            continue;
        };
        if !layout.visible {
            continue;
        }
        expanded = layout.expanded;
        if layout.expanded || layout.index == 0 {
            let swipe = surface
                .card(&toast.id)
                .map_or(Vector::ZERO, |card| card.swipe_offset());
            cards.push(view_card(toast, swipe, config, scheme, variant));
        } else {
            cards.push(stack_sliver(&layout, scheme));
        }
    }

    if group.position.vertical() == VerticalEdge::Bottom {
        cards.reverse();
    }

    let column = Column::with_children(cards)
        .spacing(if expanded { config.gap } else { 0.0 })
        .width(Length::Fixed(config.toast_width));

    let region = mouse_area(column)
        .on_enter(Message::RegionEntered)
        .on_move(|_| Message::RegionMoved)
        .on_exit(Message::RegionLeft);

    Container::new(region)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(config.offset)
        .align_x(match group.position.horizontal() {
            HorizontalEdge::Left => alignment::Horizontal::Left,
            HorizontalEdge::Center => alignment::Horizontal::Center,
            HorizontalEdge::Right => alignment::Horizontal::Right,
        })
        .align_y(match group.position.vertical() {
            VerticalEdge::Top => alignment::Vertical::Top,
            VerticalEdge::Bottom => alignment::Vertical::Bottom,
        })
        .into()
}

fn view_card<'a>(
    toast: &Toast,
    swipe: Vector,
    config: &ToasterConfig,
    scheme: &ColorScheme,
    variant: ThemeVariant,
) -> Element<'a, Message> {
    let accent = scheme.accent(toast.kind);

    let mut body = Column::new().spacing(spacing::XXS);
    if let Some(title) = &toast.title {
        body = body.push(
            Text::new(title.clone())
                .size(typography::BODY)
                .color(scheme.text_primary),
        );
    }
    if let Some(description) = &toast.description {
        body = body.push(
            Text::new(description.clone())
                .size(typography::BODY_SM)
                .color(scheme.text_secondary),
        );
    }

    let mut parts: Vec<Element<'a, Message>> = Vec::new();
    if let Some(glyph) = kind_glyph(toast.kind) {
        parts.push(Text::new(glyph).size(sizing::ICON_MD).color(accent).into());
    }
    parts.push(Container::new(body).width(Length::Fill).into());

    if let Some(cancel) = &toast.cancel {
        let text_color = scheme.text_primary;
        parts.push(
            button(Text::new(cancel.label.clone()).size(typography::CAPTION))
                .on_press(Message::Cancel(toast.id.clone()))
                .padding([spacing::XXS, spacing::XS])
                .style(move |_theme: &Theme, status| secondary_button_style(text_color, status))
                .into(),
        );
    }
    if let Some(action) = &toast.action {
        let (fill, text_color) = (scheme.text_primary, scheme.surface);
        parts.push(
            button(Text::new(action.label.clone()).size(typography::CAPTION))
                .on_press(Message::Action(toast.id.clone()))
                .padding([spacing::XXS, spacing::XS])
                .style(move |_theme: &Theme, status| {
                    action_button_style(fill, text_color, status)
                })
                .into(),
        );
    }
    if config.close_button && toast.dismissible {
        let text_color = scheme.text_primary;
        parts.push(
            button(Text::new("×").size(sizing::ICON_SM))
                .on_press(Message::Close(toast.id.clone()))
                .padding(spacing::XXS)
                .style(move |_theme: &Theme, status| dismiss_button_style(text_color, status))
                .into(),
        );
    }

    // Iced exposes no document direction, so `auto` resolves to ltr.
    if config.dir.resolve(None) == TextDirection::Rtl {
        parts.reverse();
    }
    let content = Row::with_children(parts)
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center);

    let background = if config.rich_colors {
        rich_background(toast.kind, variant).unwrap_or(scheme.surface)
    } else {
        scheme.surface
    };
    let border_color = if config.rich_colors {
        accent
    } else {
        scheme.border
    };
    let alpha = if toast.marked_for_deletion {
        opacity::OVERLAY_MEDIUM
    } else {
        opacity::OPAQUE
    };

    let card = Container::new(content)
        .width(Length::Fill)
        .padding(spacing::SM)
        .style(move |_theme: &Theme| card_style(background, border_color, alpha));

    // Shift the card by the clamped swipe displacement.
    let shifted = Container::new(card).padding(swipe_padding(swipe));

    let id = toast.id.clone();
    let pressed = Message::Pressed {
        id: toast.id.clone(),
        dismissible: toast.dismissible,
    };
    mouse_area(shifted)
        .on_press(pressed)
        .on_release(Message::Released(toast.id.clone()))
        .on_move(move |point| Message::PointerMoved(id.clone(), point))
        .into()
}

/// Visible edge of a collapsed card behind the front one.
fn stack_sliver<'a>(layout: &CardLayout, scheme: &ColorScheme) -> Element<'a, Message> {
    let surface = scheme.surface;
    let border_color = scheme.border;
    #[allow(clippy::cast_precision_loss)] // stack indices are tiny
    let inset = spacing::XS * layout.index as f32;
    Container::new(Text::new(""))
        .width(Length::Fill)
        .height(Length::Fixed(sizing::STACK_PEEK))
        .padding(Padding::ZERO.left(inset).right(inset))
        .style(move |_theme: &Theme| card_style(surface, border_color, opacity::STACKED))
        .into()
}

fn swipe_padding(swipe: Vector) -> Padding {
    Padding {
        top: swipe.y.max(0.0),
        bottom: (-swipe.y).max(0.0),
        left: swipe.x.max(0.0),
        right: (-swipe.x).max(0.0),
    }
}

/// Glyph drawn in front of the title.
#[must_use]
pub fn kind_glyph(kind: ToastKind) -> Option<&'static str> {
    match kind {
        ToastKind::Success => Some("✔"),
        ToastKind::Info => Some("ℹ"),
        ToastKind::Warning => Some("⚠"),
        ToastKind::Error => Some("✖"),
        ToastKind::Loading => Some("…"),
        ToastKind::Normal | ToastKind::Action | ToastKind::Default => None,
    }
}

/// Height a card is laid out with, reported to the surface on mount.
///
/// Iced does not hand measured sizes back to the application, so the height
/// follows the same tokens the card is built from.
#[must_use]
pub fn estimated_height(toast: &Toast) -> f32 {
    const LINE: f32 = 1.3;

    let mut text = 0.0;
    if toast.title.is_some() {
        text += typography::BODY * LINE;
    }
    if toast.description.is_some() {
        if text > 0.0 {
            text += spacing::XXS;
        }
        text += typography::BODY_SM * LINE;
    }

    let has_buttons = toast.action.is_some() || toast.cancel.is_some();
    let button_height = if has_buttons {
        typography::CAPTION * LINE + spacing::XXS * 2.0
    } else {
        0.0
    };

    let row = text.max(sizing::ICON_MD * LINE).max(button_height);
    row + spacing::SM * 2.0 + border::WIDTH_SM * 2.0
}

/// Style function for the card container.
fn card_style(background: Color, border_color: Color, alpha: f32) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(Color {
            a: background.a * alpha,
            ..background
        })),
        border: iced::Border {
            color: Color {
                a: border_color.a * alpha,
                ..border_color
            },
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        ..Default::default()
    }
}

/// Style function for the close button.
fn dismiss_button_style(text_color: Color, status: button::Status) -> button::Style {
    let hover_fill = |a: f32| {
        Some(iced::Background::Color(Color {
            a,
            ..text_color
        }))
    };

    match status {
        button::Status::Active => button::Style {
            background: None,
            text_color,
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Hovered | button::Status::Pressed => button::Style {
            background: hover_fill(if status == button::Status::Hovered {
                0.08
            } else {
                opacity::OVERLAY_SUBTLE
            }),
            text_color,
            border: iced::Border {
                radius: radius::FULL.into(),
                ..Default::default()
            },
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Disabled => button::Style {
            background: None,
            text_color: Color {
                a: opacity::OVERLAY_MEDIUM,
                ..text_color
            },
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
    }
}

/// Style function for the action button: filled with the text color.
fn action_button_style(fill: Color, text_color: Color, status: button::Status) -> button::Style {
    let a = match status {
        button::Status::Active => opacity::OPAQUE,
        button::Status::Hovered | button::Status::Pressed => opacity::STACKED,
        button::Status::Disabled => opacity::OVERLAY_MEDIUM,
    };
    button::Style {
        background: Some(iced::Background::Color(Color { a, ..fill })),
        text_color,
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Style function for the cancel button: tinted, not filled.
fn secondary_button_style(text_color: Color, status: button::Status) -> button::Style {
    let a = match status {
        button::Status::Active | button::Status::Disabled => 0.08,
        button::Status::Hovered | button::Status::Pressed => opacity::OVERLAY_SUBTLE,
    };
    button::Style {
        background: Some(iced::Background::Color(Color { a, ..text_color })),
        text_color,
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{ToastButton, ToastOptions};
    use crate::ui::design_tokens::palette;

    fn toast(options: ToastOptions) -> Toast {
        Toast::from_options(ToastId::Num(1), options)
    }

    #[test]
    fn card_style_fades_leaving_cards() {
        let style = card_style(palette::WHITE, palette::SUCCESS_500, opacity::OVERLAY_MEDIUM);

        assert_eq!(style.border.color.r, palette::SUCCESS_500.r);
        assert_eq!(style.border.color.a, opacity::OVERLAY_MEDIUM);
        assert!(style.background.is_some());
    }

    #[test]
    fn glyphs_exist_for_semantic_kinds() {
        for kind in [
            ToastKind::Success,
            ToastKind::Info,
            ToastKind::Warning,
            ToastKind::Error,
            ToastKind::Loading,
        ] {
            assert!(kind_glyph(kind).is_some());
        }
        assert!(kind_glyph(ToastKind::Default).is_none());
    }

    #[test]
    fn height_grows_with_content() {
        let title_only = estimated_height(&toast(ToastOptions::new().title("Saved")));
        let with_description = estimated_height(
            &toast(ToastOptions::new().title("Saved").description("photo.png")),
        );
        let with_button = estimated_height(
            &toast(ToastOptions::new().action(ToastButton::new("Undo"))),
        );

        assert!(with_description > title_only);
        assert!(with_button > 0.0);
    }

    #[test]
    fn swipe_padding_pushes_in_swipe_direction() {
        let padding = swipe_padding(Vector::new(12.0, -8.0));
        assert_eq!(padding.left, 12.0);
        assert_eq!(padding.right, 0.0);
        assert_eq!(padding.bottom, 8.0);
        assert_eq!(padding.top, 0.0);
    }

    #[test]
    fn action_button_is_filled() {
        let style = action_button_style(palette::BLACK, palette::WHITE, button::Status::Active);
        assert_eq!(style.text_color, palette::WHITE);
        assert!(style.background.is_some());
    }
}
