//! Visual extractor: fills, strokes, opacity and corner radii.

use figma_client::types::{RawColor, RawNode, RawPaint};
use serde_json::{Map, Value, json};

use super::ExtractedProperty;

/// Contributes shareable `fills`/`strokes` paint lists plus inline
/// scalar visuals.
pub fn extract(node: &RawNode) -> Vec<ExtractedProperty> {
    let mut out = Vec::new();

    let fills: Vec<Value> = node.fills.iter().filter_map(simplify_paint).collect();
    if !fills.is_empty() {
        out.push(ExtractedProperty::shared("fills", Value::Array(fills)));
    }

    let strokes: Vec<Value> = node.strokes.iter().filter_map(simplify_paint).collect();
    if !strokes.is_empty() {
        let mut stroke = Map::new();
        stroke.insert("paints".into(), Value::Array(strokes));
        if let Some(weight) = node.stroke_weight {
            stroke.insert("weight".into(), json!(weight));
        }
        out.push(ExtractedProperty::shared("strokes", Value::Object(stroke)));
    }

    if let Some(opacity) = node.opacity {
        if opacity < 1.0 {
            out.push(ExtractedProperty::inline("opacity", json!(opacity)));
        }
    }

    if let Some(radius) = node.corner_radius {
        if radius > 0.0 {
            out.push(ExtractedProperty::inline("borderRadius", json!(radius)));
        }
    }

    out
}

/// Collapses a raw paint into its IR form.
///
/// Solid paints become a hex string, image paints keep the `imageRef`
/// that keys the binary, gradients keep type + stops. Invisible paints
/// are dropped entirely.
fn simplify_paint(paint: &RawPaint) -> Option<Value> {
    if !paint.visible {
        return None;
    }

    match paint.paint_type.as_str() {
        "SOLID" => {
            let color = paint.color?;
            Some(json!(rgba_to_hex(color, paint.opacity.unwrap_or(1.0))))
        }
        "IMAGE" => {
            let mut obj = Map::new();
            obj.insert("type".into(), json!("IMAGE"));
            if let Some(image_ref) = &paint.image_ref {
                obj.insert("imageRef".into(), json!(image_ref));
            }
            if let Some(scale_mode) = &paint.scale_mode {
                obj.insert("scaleMode".into(), json!(scale_mode));
            }
            Some(Value::Object(obj))
        }
        gradient if gradient.starts_with("GRADIENT_") => {
            let stops: Vec<Value> = paint
                .gradient_stops
                .iter()
                .map(|stop| {
                    json!({
                        "position": stop.position,
                        "color": rgba_to_hex(stop.color, 1.0),
                    })
                })
                .collect();
            Some(json!({ "type": gradient, "stops": stops }))
        }
        other => Some(json!({ "type": other })),
    }
}

/// `#RRGGBB`, or `#RRGGBBAA` when the effective alpha is not opaque.
fn rgba_to_hex(color: RawColor, paint_opacity: f64) -> String {
    let alpha = (color.a * paint_opacity).clamp(0.0, 1.0);
    let red = channel_to_u8(color.r);
    let green = channel_to_u8(color.g);
    let blue = channel_to_u8(color.b);
    if (alpha - 1.0).abs() <= f64::EPSILON {
        format!("#{red:02X}{green:02X}{blue:02X}")
    } else {
        let a = channel_to_u8(alpha);
        format!("#{red:02X}{green:02X}{blue:02X}{a:02X}")
    }
}

fn channel_to_u8(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use figma_client::types::RawColor;

    fn color(r: f64, g: f64, b: f64, a: f64) -> RawColor {
        RawColor { r, g, b, a }
    }

    #[test]
    fn solid_hex_without_alpha_when_opaque() {
        assert_eq!(rgba_to_hex(color(1.0, 0.0, 0.5, 1.0), 1.0), "#FF0080");
    }

    #[test]
    fn solid_hex_encodes_combined_alpha() {
        assert_eq!(rgba_to_hex(color(1.0, 0.0, 0.5, 1.0), 0.5), "#FF008080");
    }

    #[test]
    fn channel_conversion_clamps_range() {
        assert_eq!(channel_to_u8(-0.2), 0);
        assert_eq!(channel_to_u8(1.4), 255);
    }

    #[test]
    fn invisible_paint_is_dropped() {
        let paint = RawPaint {
            paint_type: "SOLID".into(),
            visible: false,
            opacity: None,
            color: Some(color(1.0, 1.0, 1.0, 1.0)),
            image_ref: None,
            scale_mode: None,
            gradient_stops: Vec::new(),
        };
        assert!(simplify_paint(&paint).is_none());
    }

    #[test]
    fn image_paint_keeps_image_ref() {
        let paint = RawPaint {
            paint_type: "IMAGE".into(),
            visible: true,
            opacity: None,
            color: None,
            image_ref: Some("img-ref-1".into()),
            scale_mode: Some("FILL".into()),
            gradient_stops: Vec::new(),
        };
        let value = simplify_paint(&paint).unwrap();
        assert_eq!(value["type"], "IMAGE");
        assert_eq!(value["imageRef"], "img-ref-1");
    }
}
