// SPDX-License-Identifier: MPL-2.0
//! Stacking geometry handed to the card renderer.

use super::notification::{ToastId, VerticalEdge};
use super::store::PositionGroup;
use crate::config::ToasterConfig;

/// Where and how a card sits inside its position group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardLayout {
    /// 0 is the front (newest) card.
    pub index: usize,
    /// Distance from the stack edge when expanded: the heights of every card
    /// in front plus one gap per card.
    pub offset: f32,
    /// Height of the front card; collapsed cards borrow it.
    pub front_height: f32,
    pub visible: bool,
    pub expanded: bool,
    pub z_index: usize,
    /// +1 when the stack grows downwards from the top edge, -1 otherwise.
    pub lift: f32,
}

impl CardLayout {
    /// Layout of `id` within `group`, or `None` if the group does not hold it.
    #[must_use]
    pub fn compute(
        group: &PositionGroup,
        id: &ToastId,
        expanded: bool,
        config: &ToasterConfig,
    ) -> Option<Self> {
        let index = group.index_of(id)?;
        let height_index = group
            .heights
            .iter()
            .position(|record| &record.toast_id == id)
            .unwrap_or(0);
        let heights_before: f32 = group
            .heights
            .iter()
            .take(height_index)
            .map(|record| record.height)
            .sum();

        #[allow(clippy::cast_precision_loss)] // stack sizes are tiny
        let offset = height_index as f32 * config.gap + heights_before;

        Some(Self {
            index,
            offset,
            front_height: group.heights.first().map_or(0.0, |record| record.height),
            visible: config.visible_toasts.contains(index),
            expanded: expanded || config.expand,
            z_index: group.toasts.len() - index,
            lift: match group.position.vertical() {
                VerticalEdge::Top => 1.0,
                VerticalEdge::Bottom => -1.0,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{HeightRecord, Position, Toast, ToastOptions};

    fn group(position: Position, heights: &[f32]) -> PositionGroup {
        let toasts: Vec<Toast> = (0..heights.len() as u64)
            .rev()
            .map(|id| Toast::from_options(ToastId::Num(id), ToastOptions::new()))
            .collect();
        let heights = toasts
            .iter()
            .zip(heights)
            .map(|(toast, height)| HeightRecord {
                toast_id: toast.id.clone(),
                height: *height,
            })
            .collect();
        PositionGroup {
            position,
            toasts,
            heights,
        }
    }

    #[test]
    fn offset_accumulates_heights_and_gaps() {
        let config = ToasterConfig::default();
        let group = group(Position::BottomRight, &[50.0, 60.0, 70.0, 80.0]);

        let offsets: Vec<f32> = group
            .toasts
            .iter()
            .map(|toast| {
                CardLayout::compute(&group, &toast.id, false, &config)
                    .map(|layout| layout.offset)
                    .unwrap_or_default()
            })
            .collect();

        assert_eq!(offsets, vec![0.0, 64.0, 138.0, 222.0]);
    }

    #[test]
    fn visibility_z_order_and_front_height() {
        let config = ToasterConfig::default();
        let group = group(Position::TopLeft, &[50.0, 60.0, 70.0, 80.0]);
        let back = &group.toasts[3].id;

        let layout = CardLayout::compute(&group, back, true, &config).expect("toast in group");

        assert_eq!(layout.index, 3);
        assert!(!layout.visible);
        assert_eq!(layout.z_index, 1);
        assert_eq!(layout.front_height, 50.0);
        assert_eq!(layout.lift, 1.0);
        assert!(layout.expanded);
    }

    #[test]
    fn unmeasured_card_sits_at_front_slot() {
        let config = ToasterConfig::default();
        let mut group = group(Position::BottomCenter, &[40.0]);
        group
            .toasts
            .insert(0, Toast::from_options(ToastId::from("new"), ToastOptions::new()));

        let layout = CardLayout::compute(&group, &ToastId::from("new"), false, &config)
            .expect("toast in group");

        assert_eq!(layout.index, 0);
        assert_eq!(layout.offset, 0.0);
        assert_eq!(layout.lift, -1.0);
    }

    #[test]
    fn expand_flag_forces_expanded_layout() {
        let config = ToasterConfig {
            expand: true,
            ..ToasterConfig::default()
        };
        let group = group(Position::BottomRight, &[40.0]);
        let layout = CardLayout::compute(&group, &group.toasts[0].id, false, &config)
            .expect("toast in group");
        assert!(layout.expanded);
        assert!(CardLayout::compute(&group, &ToastId::from("missing"), false, &config).is_none());
    }
}
