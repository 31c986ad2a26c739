use super::types::TagFrequency;
use crate::util::display_width;

// ============================================================================
// Device Profiles
// ============================================================================

/// Coarse screen-size tier affecting layout constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    Tablet,
    Phone,
}

/// Layout constants for one device tier.
///
/// The *shape* of the scale function — linear interpolation between a
/// device-specific floor and floor + spread — is part of the layout contract;
/// the constants themselves are presentation-tuned values carried from the
/// reference design (desktop gets the widest range, phone the narrowest).
#[derive(Debug, Clone, Copy)]
pub struct DeviceProfile {
    /// Font-size scale for the least frequent tag (em).
    pub base_scale: f32,
    /// Added to `base_scale` for the most frequent tag (em).
    pub scale_spread: f32,
    /// Estimated width of one character at scale 1.0 (em).
    pub char_width: f32,
    /// Horizontal padding inside a tag chip, per side (em).
    pub tag_padding: f32,
    /// Base font size (px) used to convert em row heights to pixels.
    pub base_font_px: f32,
    /// Vertical spacing between rows (px).
    pub row_spacing_px: f32,
    /// Vertical padding of the cloud container, per side (px).
    pub vertical_padding_px: f32,
    /// Minimum cloud height (px), the floor for `total_height`.
    pub min_height_px: f32,
}

/// Horizontal margin around a tag chip, both sides combined (em).
/// Same on every device tier.
const TAG_MARGIN: f32 = 0.4;

/// Line-height factor applied when converting a row's em height to pixels.
const LINE_HEIGHT: f32 = 1.3;

impl DeviceClass {
    pub fn profile(self) -> DeviceProfile {
        match self {
            DeviceClass::Desktop => DeviceProfile {
                base_scale: 0.9,
                scale_spread: 0.9,
                char_width: 0.65,
                tag_padding: 0.8,
                base_font_px: 16.0,
                row_spacing_px: 10.0,
                vertical_padding_px: 40.0,
                min_height_px: 300.0,
            },
            DeviceClass::Tablet => DeviceProfile {
                base_scale: 0.35,
                scale_spread: 0.25,
                char_width: 0.6,
                tag_padding: 0.7,
                base_font_px: 15.0,
                row_spacing_px: 8.0,
                vertical_padding_px: 30.0,
                min_height_px: 250.0,
            },
            DeviceClass::Phone => DeviceProfile {
                base_scale: 0.3,
                scale_spread: 0.2,
                char_width: 0.55,
                tag_padding: 0.6,
                base_font_px: 14.0,
                row_spacing_px: 6.0,
                vertical_padding_px: 20.0,
                min_height_px: 200.0,
            },
        }
    }
}

// ============================================================================
// Layout Output
// ============================================================================

/// One packed row of the cloud. Transient: rebuilt on every layout pass.
#[derive(Debug, Clone)]
pub struct TagRow {
    pub tags: Vec<TagFrequency>,
    /// Max per-tag font-size scale among the row's members (em).
    pub row_height: f32,
}

/// A complete layout pass: packed rows plus the container height they need.
#[derive(Debug, Clone)]
pub struct CloudLayout {
    pub rows: Vec<TagRow>,
    /// Total container height (px), floored at the device minimum.
    pub total_height: f32,
}

// ============================================================================
// Scale Model
// ============================================================================

/// Count range of a tag set, the basis of the font-size scale.
#[derive(Debug, Clone, Copy)]
struct CountRange {
    min: u32,
    /// `max(1, max - min)` — avoids division by zero when all counts equal.
    range: u32,
}

impl CountRange {
    fn of(tags: &[TagFrequency]) -> Self {
        let min = tags.iter().map(|t| t.count).min().unwrap_or(0);
        let max = tags.iter().map(|t| t.count).max().unwrap_or(0);
        Self {
            min,
            range: (max - min).max(1),
        }
    }

    /// Linear interpolation between the device floor and floor + spread.
    fn scale(&self, count: u32, profile: &DeviceProfile) -> f32 {
        let fraction = (count.saturating_sub(self.min)) as f32 / self.range as f32;
        profile.base_scale + fraction * profile.scale_spread
    }
}

/// Whether a tag sits in the top quartile of the frequency range.
/// Presentation layers use this for emphasis styling.
pub fn is_large(tags: &[TagFrequency], count: u32) -> bool {
    if tags.is_empty() {
        return false;
    }
    let range = CountRange::of(tags);
    count as f32 >= range.min as f32 + range.range as f32 * 0.75
}

// ============================================================================
// Layout Engine
// ============================================================================

/// Pack a weighted tag set into rows for a container of the given width.
///
/// Tags are sorted by count descending with an alphabetical tie-break (the
/// deterministic ordering is an invariant — equal-count tags always land in
/// the same positions), then packed greedily: each tag's rendered width is
/// estimated from its display width, the device character width, its scale,
/// padding, and margin; a tag that would overflow the container closes the
/// current row and opens a new one.
///
/// Edge cases:
/// - empty `tags` produces zero rows and the device minimum height;
/// - a tag wider than the container still gets a row of its own — nothing is
///   ever dropped, so `container_width = 0.0` degrades to one tag per row.
pub fn layout(tags: &[TagFrequency], container_width: f32, device: DeviceClass) -> CloudLayout {
    let profile = device.profile();

    if tags.is_empty() {
        return CloudLayout {
            rows: Vec::new(),
            total_height: profile.min_height_px,
        };
    }

    let range = CountRange::of(tags);

    let mut sorted: Vec<TagFrequency> = tags.to_vec();
    sorted.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    let mut rows: Vec<TagRow> = Vec::new();
    let mut current: Vec<TagFrequency> = Vec::new();
    let mut current_width = 0.0_f32;
    let mut current_height = 0.0_f32;

    for tag in sorted {
        let scale = range.scale(tag.count, &profile);
        let tag_width = display_width(&tag.name) as f32 * profile.char_width * scale
            + profile.tag_padding * 2.0
            + TAG_MARGIN;

        if !current.is_empty() && current_width + tag_width > container_width {
            rows.push(TagRow {
                tags: std::mem::take(&mut current),
                row_height: current_height,
            });
            current_width = 0.0;
            current_height = 0.0;
        }

        current.push(tag);
        current_width += tag_width;
        current_height = current_height.max(scale);
    }

    if !current.is_empty() {
        rows.push(TagRow {
            tags: current,
            row_height: current_height,
        });
    }

    let total_height = cloud_height(&rows, &profile).max(profile.min_height_px);

    CloudLayout { rows, total_height }
}

/// Sum of per-row pixel heights plus the container's vertical padding.
fn cloud_height(rows: &[TagRow], profile: &DeviceProfile) -> f32 {
    let rows_height: f32 = rows
        .iter()
        .map(|row| row.row_height * profile.base_font_px * LINE_HEIGHT + profile.row_spacing_px)
        .sum();
    rows_height + profile.vertical_padding_px * 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn tag(name: &str, count: u32) -> TagFrequency {
        TagFrequency {
            name: Arc::from(name),
            count,
        }
    }

    fn flat_names(layout: &CloudLayout) -> Vec<String> {
        layout
            .rows
            .iter()
            .flat_map(|r| r.tags.iter().map(|t| t.name.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_tags_zero_rows_min_height() {
        for device in [DeviceClass::Desktop, DeviceClass::Tablet, DeviceClass::Phone] {
            let result = layout(&[], 600.0, device);
            assert!(result.rows.is_empty());
            assert_eq!(result.total_height, device.profile().min_height_px);
        }
    }

    #[test]
    fn test_sort_count_desc_then_alphabetical() {
        let tags = vec![tag("b", 2), tag("c", 1), tag("a", 2)];
        let result = layout(&tags, 10_000.0, DeviceClass::Desktop);
        // Equal counts a vs b: a before b (alphabetical tie-break).
        assert_eq!(flat_names(&result), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_zero_width_container_one_tag_per_row() {
        let tags = vec![tag("alpha", 3), tag("beta", 2), tag("gamma", 1)];
        let result = layout(&tags, 0.0, DeviceClass::Desktop);

        assert_eq!(result.rows.len(), 3);
        for row in &result.rows {
            assert_eq!(row.tags.len(), 1);
        }
        assert_eq!(flat_names(&result).len(), 3); // nothing dropped
    }

    #[test]
    fn test_oversized_tag_gets_own_row_not_dropped() {
        let tags = vec![tag("a", 1), tag("extraordinarily-long-tag-name", 1)];
        let result = layout(&tags, 5.0, DeviceClass::Desktop);

        let names = flat_names(&result);
        assert!(names.contains(&"extraordinarily-long-tag-name".to_string()));
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_wide_container_single_row() {
        let tags = vec![tag("a", 1), tag("b", 2), tag("c", 3)];
        let result = layout(&tags, 10_000.0, DeviceClass::Desktop);
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].tags.len(), 3);
    }

    #[test]
    fn test_row_height_is_max_member_scale() {
        // Counts 1 and 5 on desktop: scales 0.9 and 1.8.
        let tags = vec![tag("big", 5), tag("small", 1)];
        let result = layout(&tags, 10_000.0, DeviceClass::Desktop);
        assert_eq!(result.rows.len(), 1);
        assert!((result.rows[0].row_height - 1.8).abs() < 1e-6);
    }

    #[test]
    fn test_equal_counts_use_base_scale() {
        // All counts equal: range clamps to 1, fraction 0, scale = base.
        let tags = vec![tag("a", 4), tag("b", 4), tag("c", 4)];
        let result = layout(&tags, 10_000.0, DeviceClass::Phone);
        let base = DeviceClass::Phone.profile().base_scale;
        assert!((result.rows[0].row_height - base).abs() < 1e-6);
    }

    #[test]
    fn test_total_height_matches_row_sum() {
        let tags = vec![tag("alpha", 3), tag("beta", 1)];
        let device = DeviceClass::Desktop;
        let profile = device.profile();
        let result = layout(&tags, 10_000.0, device);

        let expected: f32 = result
            .rows
            .iter()
            .map(|r| r.row_height * profile.base_font_px * 1.3 + profile.row_spacing_px)
            .sum::<f32>()
            + profile.vertical_padding_px * 2.0;
        assert_eq!(result.total_height, expected.max(profile.min_height_px));
    }

    #[test]
    fn test_total_height_floored_at_device_minimum() {
        // One short row computes far below the desktop minimum of 300px.
        let tags = vec![tag("a", 1)];
        let result = layout(&tags, 10_000.0, DeviceClass::Desktop);
        assert_eq!(result.total_height, 300.0);
    }

    #[test]
    fn test_layout_deterministic_across_input_order() {
        let forward = vec![tag("a", 2), tag("b", 2), tag("c", 1)];
        let reversed = vec![tag("c", 1), tag("b", 2), tag("a", 2)];

        let left = layout(&forward, 400.0, DeviceClass::Tablet);
        let right = layout(&reversed, 400.0, DeviceClass::Tablet);
        assert_eq!(flat_names(&left), flat_names(&right));
        assert_eq!(left.total_height, right.total_height);
    }

    #[test]
    fn test_is_large_top_quartile() {
        let tags = vec![tag("a", 1), tag("b", 5), tag("c", 10)];
        // range = 9, threshold = 1 + 6.75 = 7.75
        assert!(is_large(&tags, 10));
        assert!(is_large(&tags, 8));
        assert!(!is_large(&tags, 5));
        assert!(!is_large(&[], 3));
    }

    #[test]
    fn test_phone_scales_narrower_than_desktop() {
        let tags = vec![tag("rare", 1), tag("common", 9)];
        let phone = layout(&tags, 10_000.0, DeviceClass::Phone);
        let desktop = layout(&tags, 10_000.0, DeviceClass::Desktop);
        assert!(phone.rows[0].row_height < desktop.rows[0].row_height);
    }
}
