//! Integration tests for flyout-core.
//!
//! These tests verify the public API works correctly end-to-end.

use flyout_core::{
    Canvas, Color, DrawCommand, Easing, LinearGradient, Observers, Point, RecordingCanvas, Rect,
    Tween,
};
use std::sync::{Arc, Mutex};

// =============================================================================
// Color
// =============================================================================

#[test]
fn test_color_roundtrip_hex() {
    let original = Color::rgb(0.5, 0.25, 0.75);
    let parsed = Color::from_hex(&original.to_hex()).expect("valid hex");

    assert!((original.r - parsed.r).abs() < 0.01);
    assert!((original.g - parsed.g).abs() < 0.01);
    assert!((original.b - parsed.b).abs() < 0.01);
}

#[test]
fn test_toggle_palette_lightening() {
    let off = Color::from_hex("#CCCCCC").expect("valid hex");
    let on = Color::from_hex("#4CAF50").expect("valid hex");

    assert_eq!(off.lighter(120).to_hex(), "#f5f5f5");
    let (_, _, v_on) = on.to_hsv();
    let (_, _, v_light) = on.lighter(120).to_hsv();
    assert!(v_light > v_on);
}

// =============================================================================
// Animation driven like a widget tick
// =============================================================================

#[test]
fn test_color_tween_frames() {
    let off = Color::from_hex("#CCCCCC").expect("valid hex");
    let on = Color::from_hex("#4CAF50").expect("valid hex");
    let mut tween = Tween::new(off, on, 0.3).with_easing(Easing::EaseInOut);

    let mut frames = 0;
    while tween.advance(1.0 / 60.0) {
        frames += 1;
        assert!(frames < 100, "tween never finished");
    }
    assert_eq!(tween.value(), on);
    assert!((17..=19).contains(&frames));
}

#[test]
fn test_retarget_mid_flight_reverses_smoothly() {
    let mut tween = Tween::new(0.0f64, 1.0, 0.3);
    tween.advance(0.1);
    let before = tween.value();
    tween.retarget(0.0);
    assert!((tween.value() - before).abs() < 1e-9);
    tween.advance(0.3);
    assert_eq!(tween.value(), 0.0);
}

// =============================================================================
// Canvas + gradient
// =============================================================================

#[test]
fn test_recorded_gradient_serializes() {
    let mut canvas = RecordingCanvas::new();
    let track = Rect::new(0.0, 7.5, 60.0, 15.0);
    let gradient = LinearGradient::horizontal(track, Color::WHITE, Color::BLACK);
    canvas.fill_gradient(track, 7.5, &gradient);
    canvas.fill_circle(Point::new(12.0, 15.0), 12.0, Color::WHITE);

    let json = serde_json::to_string(canvas.commands()).expect("serializable");
    let back: Vec<DrawCommand> = serde_json::from_str(&json).expect("deserializable");
    assert_eq!(back, canvas.commands());
}

// =============================================================================
// Observers
// =============================================================================

#[test]
fn test_observers_collect_values() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut observers = Observers::<f64>::new();
    let sink = Arc::clone(&seen);
    observers.subscribe(move |v| sink.lock().expect("lock").push(*v));

    let mut tween = Tween::new(0.0f64, 1.0, 0.3);
    while tween.advance(0.1) {
        observers.notify(&tween.value());
    }
    observers.notify(&tween.value());

    let seen = seen.lock().expect("lock");
    assert_eq!(seen.len(), 3);
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(seen.last().copied(), Some(1.0));
}
