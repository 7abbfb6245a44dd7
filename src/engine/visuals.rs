//! Point visual state
//!
//! Recomputed for every marker on every tick from the live required/hit
//! sets, so a marker's look never lags the game state by more than a tick.

use crate::rasterizer::Color;
use super::inputs::FrameInputs;
use super::scene::PointGroup;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointVisual {
    pub color: Color,
    pub opacity: f32,
    pub glow_active: bool,
    pub glow_opacity: f32,
}

/// Colors and pulse shape for markers
#[derive(Debug, Clone, Copy)]
pub struct VisualStyle {
    pub highlight: Color,
    pub neutral: Color,
    pub target_opacity: f32,
    pub idle_opacity: f32,
    pub glow_frequency: f32,
    pub glow_scale_amplitude: f32,
    pub glow_opacity_base: f32,
    pub glow_opacity_amplitude: f32,
}

/// Visual state for a single point. Returns the glow pulse scale when the
/// glow is active; an inactive glow keeps whatever scale it last had.
pub fn point_visual(is_target: bool, is_hit: bool, clock: f32, style: &VisualStyle) -> (PointVisual, Option<f32>) {
    let color = if is_hit || is_target { style.highlight } else { style.neutral };
    let opacity = if is_target { style.target_opacity } else { style.idle_opacity };

    if is_target && !is_hit {
        let phase = (clock * style.glow_frequency).sin();
        let visual = PointVisual {
            color,
            opacity,
            glow_active: true,
            glow_opacity: style.glow_opacity_base + phase * style.glow_opacity_amplitude,
        };
        (visual, Some(1.0 + phase * style.glow_scale_amplitude))
    } else {
        let visual = PointVisual {
            color,
            opacity,
            glow_active: false,
            glow_opacity: 0.0,
        };
        (visual, None)
    }
}

/// Refresh every marker's visual state and glow pulse
pub fn update_visuals(
    group: &mut PointGroup,
    visuals: &mut Vec<PointVisual>,
    inputs: &FrameInputs,
    clock: f32,
    style: &VisualStyle,
) {
    visuals.clear();
    for i in 0..group.markers().len() {
        let id = &group.markers()[i].id;
        let (visual, pulse) = point_visual(inputs.is_required(id), inputs.is_hit(id), clock, style);
        visuals.push(visual);
        if let Some(scale) = pulse {
            group.set_glow_scale(i, scale);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PointRegistry, ACUPOINTS_RON};

    fn style() -> VisualStyle {
        VisualStyle {
            highlight: Color::from_hex(0xffcc33),
            neutral: Color::from_hex(0x00f3ff),
            target_opacity: 1.0,
            idle_opacity: 0.15,
            glow_frequency: 6.0,
            glow_scale_amplitude: 0.4,
            glow_opacity_base: 0.2,
            glow_opacity_amplitude: 0.15,
        }
    }

    fn inputs(required: &[&str], hit: &[&str]) -> FrameInputs {
        FrameInputs {
            current_level: 0,
            required: required.iter().map(|s| s.to_string()).collect(),
            hit: hit.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_glow_iff_target_and_not_hit() {
        let s = style();
        for &(target, hit) in &[(false, false), (false, true), (true, false), (true, true)] {
            for step in 0..50 {
                let (v, pulse) = point_visual(target, hit, step as f32 * 0.02, &s);
                assert_eq!(v.glow_active, target && !hit);
                assert_eq!(pulse.is_some(), target && !hit);
                if !v.glow_active {
                    assert_eq!(v.glow_opacity, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_colors_and_opacity() {
        let s = style();
        let (idle, _) = point_visual(false, false, 0.0, &s);
        assert_eq!(idle.color, s.neutral);
        assert_eq!(idle.opacity, 0.15);
        let (target, _) = point_visual(true, false, 0.0, &s);
        assert_eq!(target.color, s.highlight);
        assert_eq!(target.opacity, 1.0);
    }

    #[test]
    fn test_pulse_follows_clock() {
        let s = style();
        let clock = 0.5;
        let (v, pulse) = point_visual(true, false, clock, &s);
        let phase = (clock * 6.0f32).sin();
        assert!((pulse.unwrap() - (1.0 + 0.4 * phase)).abs() < 1e-6);
        assert!((v.glow_opacity - (0.2 + 0.15 * phase)).abs() < 1e-6);
    }

    #[test]
    fn test_point_moving_to_hit_set_loses_glow() {
        let registry = PointRegistry::from_ron_str(ACUPOINTS_RON).unwrap();
        let mut group = PointGroup::build(&registry, 0.07, 0.14);
        let li4 = group.markers().iter().position(|m| m.id == "LI4").unwrap();
        let mut visuals = Vec::new();
        let s = style();

        update_visuals(&mut group, &mut visuals, &inputs(&["LI4", "LU7"], &[]), 0.3, &s);
        assert!(visuals[li4].glow_active);
        let pulsed = group.glow_scale(li4);

        // Next tick: LI4 has been hit
        update_visuals(&mut group, &mut visuals, &inputs(&["LI4", "LU7"], &["LI4"]), 0.32, &s);
        assert_eq!(visuals[li4].color, s.highlight);
        assert!(!visuals[li4].glow_active);
        assert_eq!(visuals[li4].glow_opacity, 0.0);
        // Suppressed glow keeps its last pulse size
        assert_eq!(group.glow_scale(li4), pulsed);
    }

    #[test]
    fn test_hit_but_no_longer_required() {
        let registry = PointRegistry::from_ron_str(ACUPOINTS_RON).unwrap();
        let mut group = PointGroup::build(&registry, 0.07, 0.14);
        let li4 = group.markers().iter().position(|m| m.id == "LI4").unwrap();
        let mut visuals = Vec::new();
        let s = style();

        update_visuals(&mut group, &mut visuals, &inputs(&["LU7"], &["LI4"]), 0.3, &s);
        assert_eq!(visuals[li4].color, s.highlight);
        assert_eq!(visuals[li4].opacity, s.idle_opacity);
        assert!(!visuals[li4].glow_active);
        assert_eq!(visuals[li4].glow_opacity, 0.0);
    }

    #[test]
    fn test_unknown_ids_never_match() {
        let registry = PointRegistry::from_ron_str(ACUPOINTS_RON).unwrap();
        let mut group = PointGroup::build(&registry, 0.07, 0.14);
        let mut visuals = Vec::new();
        update_visuals(&mut group, &mut visuals, &inputs(&["NOPE"], &["ALSO_NOPE"]), 0.0, &style());
        assert_eq!(visuals.len(), 15);
        assert!(visuals.iter().all(|v| !v.glow_active && v.opacity == 0.15));
    }
}
