use crate::studio::state::RoomDimensions;

pub const ESTIMATE_PROMPT: &str = r#"Analyze this room image and estimate its dimensions (Length, Width, Height).
Assume standard ceiling heights (e.g., 8-10ft) if not obvious.
Look for visual cues like door frames, windows, and furniture sizes to estimate the floor area.

Return the result in JSON format with keys: length, width, height, unit.
Use 'ft' as the default unit.
Example: { "length": "12", "width": "10", "height": "9", "unit": "ft" }"#;

/// Prompt sent after the room and furniture images.
pub fn composite_prompt(instruction: &str, dimensions: Option<&RoomDimensions>) -> String {
    let dimension_context = dimensions
        .map(|d| {
            format!(
                "Room Dimensions: {}x{}x{} {}. Use these dimensions to ensure the object is scaled perfectly relative to the room volume.",
                d.length,
                d.width,
                d.height,
                d.unit.as_str()
            )
        })
        .unwrap_or_default();

    let mut prompt = format!(
        r#"You are an expert interior design AI specialized in photorealistic image editing.

The first image provided is the ROOM.
The second image provided is the FURNITURE OBJECT.

Task:
Generate a realistic output image where the furniture object (Image 2) is placed naturally inside the room (Image 1).

Strict Requirements:
1. Perspective: The object must be aligned with the floor plane and perspective lines of the room.
2. Scale: Estimate the depth of the room and scale the object appropriately so it looks realistic. {dimension_context}
3. Lighting & Shadows: Analyze the light direction in the room. Generate realistic cast shadows and contact shadows for the object. Match the color temperature.
4. Object Fidelity: Do NOT change the design, color, or texture of the furniture object. Use the provided object exactly. Isolate it from its background if necessary.
5. Room Fidelity: Do NOT change the walls, existing furniture, or structure of the room. Only insert the new object.
6. Output Quality: High resolution, photorealistic, no artifacts.
"#
    );

    if !instruction.is_empty() {
        prompt.push_str(&format!("\nAdditional User Instruction: {instruction}\n"));
    }

    prompt.push_str("\nReturn only the generated image.");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::studio::state::Unit;

    #[test]
    fn lists_every_requirement() {
        let prompt = composite_prompt("", None);
        for needle in [
            "Perspective",
            "Scale",
            "Lighting & Shadows",
            "Object Fidelity",
            "Room Fidelity",
            "Output Quality",
        ] {
            assert!(prompt.contains(needle), "missing {needle}");
        }
        assert!(!prompt.contains("Room Dimensions"));
        assert!(!prompt.contains("Additional User Instruction"));
    }

    #[test]
    fn dimensions_land_in_scale_requirement() {
        let dims = RoomDimensions {
            length: "4".into(),
            width: "3.5".into(),
            height: "2.6".into(),
            unit: Unit::Meters,
        };
        let prompt = composite_prompt("", Some(&dims));
        let scale_line = prompt.lines().find(|l| l.starts_with("2. Scale")).unwrap();
        assert!(scale_line.contains("Room Dimensions: 4x3.5x2.6 m."));
    }

    #[test]
    fn instruction_is_appended_verbatim() {
        let prompt = composite_prompt("Rotate it 15° left, near the window", None);
        assert!(
            prompt.contains("Additional User Instruction: Rotate it 15° left, near the window")
        );
        assert!(prompt.trim_end().ends_with("Return only the generated image."));
    }
}
