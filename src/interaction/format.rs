//! Renders a face analysis into the text sent back to the chat.

use std::fmt::{self, Write};

use serde_json::Number;

use crate::base::{replies::ANALYSIS_HEADER, types::Face};

/// Magnitude from which JavaScript switches integral numbers to exponent notation.
const PLAIN_INTEGER_LIMIT: f64 = 1e21;

/// Formats the faces found in an image, in the order they were reported.
pub fn format_faces(faces: &[Face]) -> String {
    let noun = if faces.len() == 1 { "face" } else { "faces" };
    let mut text = format!("{ANALYSIS_HEADER}\nI found {} {noun} in this image.\n", faces.len());

    // Writing into a `String` cannot fail.
    for face in faces {
        let _ = write!(text, "\n\n* Age: {}", Plain(&face.age));

        for (emotion, score) in &face.emotion {
            let _ = write!(text, "\n  - {emotion}: {}", Plain(score));
        }
    }

    text
}

/// Prints a number the way the analysis producer prints it: integral floats drop their `.0`.
struct Plain<'a>(&'a Number);

impl fmt::Display for Plain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_f64() {
            Some(value) if self.0.is_f64() && value == 0.0 => f.write_str("0"),
            Some(value) if self.0.is_f64() && value.fract() == 0.0 && value.abs() < PLAIN_INTEGER_LIMIT => write!(f, "{value:.0}"),
            _ => write!(f, "{}", self.0),
        }
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn faces(value: Value) -> Vec<Face> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_no_faces() {
        assert_eq!(format_faces(&[]), "Hi! Thanks for playing. 😃\nI found 0 faces in this image.\n");
    }

    #[test]
    fn test_one_face() {
        let faces = faces(json!([{ "age": 30, "emotion": { "happiness": 0.9, "sadness": 0.1 } }]));

        assert_eq!(
            format_faces(&faces),
            "Hi! Thanks for playing. 😃\nI found 1 face in this image.\n\n\n* Age: 30\n  - happiness: 0.9\n  - sadness: 0.1"
        );
    }

    #[test]
    fn test_many_faces() {
        let faces = faces(json!([
            { "age": 25, "emotion": { "anger": 0, "neutral": 1 } },
            { "age": 61.5, "emotion": { "surprise": 0.25 } },
        ]));

        assert_eq!(
            format_faces(&faces),
            "Hi! Thanks for playing. 😃\nI found 2 faces in this image.\n\n\n* Age: 25\n  - anger: 0\n  - neutral: 1\n\n* Age: 61.5\n  - surprise: 0.25"
        );
    }

    #[test]
    fn test_empty_emotions() {
        let faces = faces(json!([{ "age": 7, "emotion": {} }, { "age": 8 }]));

        assert_eq!(format_faces(&faces), "Hi! Thanks for playing. 😃\nI found 2 faces in this image.\n\n\n* Age: 7\n\n* Age: 8");
    }

    #[test]
    fn test_unusual_emotion_keys() {
        let faces = faces(json!([{ "age": 40, "emotion": { "zeal": 0.5, "boredom": 0.004, "anger": 0.001 } }]));
        let text = format_faces(&faces);

        assert!(text.ends_with("* Age: 40\n  - zeal: 0.5\n  - boredom: 0.004\n  - anger: 0.001"));
    }

    #[test]
    fn test_integral_floats_drop_fraction() {
        let faces = faces(json!([{ "age": 30.0, "emotion": { "neutral": 1.0, "anger": 0.0, "fear": -0.0, "sadness": 0.25 } }]));

        assert!(format_faces(&faces).ends_with("* Age: 30\n  - neutral: 1\n  - anger: 0\n  - fear: 0\n  - sadness: 0.25"));
    }

    #[test]
    fn test_plain_numbers() {
        let plain = |value: Value| Plain(value.as_number().unwrap()).to_string();

        assert_eq!(plain(json!(1.0)), "1");
        assert_eq!(plain(json!(0.0)), "0");
        assert_eq!(plain(json!(30.0)), "30");
        assert_eq!(plain(json!(-4.0)), "-4");
        assert_eq!(plain(json!(0.9)), "0.9");
        assert_eq!(plain(json!(61.5)), "61.5");
        assert_eq!(plain(json!(42)), "42");
        assert_eq!(plain(json!(1e20)), "100000000000000000000");
    }

    #[test]
    fn test_header_counts() {
        let face = Face {
            age: 1.into(),
            emotion: Vec::new(),
        };

        for n in 0..5 {
            let text = format_faces(&vec![face.clone(); n]);
            let noun = if n == 1 { "face" } else { "faces" };

            assert!(text.contains(&format!("\nI found {n} {noun} in this image.\n")));
            assert_eq!(text.matches("* Age:").count(), n);
        }
    }
}
