//! Prompt text sent to the text-generation backend.

use crate::Intent;

/// Ask for object centers on a `width × height` canvas.
pub fn detection_prompt(width: usize, height: usize) -> String {
    let max_x = width.saturating_sub(1);
    let max_y = height.saturating_sub(1);
    format!(
        "TASK: Locate the center of every object on the desk with pixel accuracy.\n\n\
         IMAGE:\n\
         - Width: {width} pixels (0 to {max_x})\n\
         - Height: {height} pixels (0 to {max_y})\n\
         - Origin: the TOP-LEFT corner is (0, 0)\n\n\
         INSTRUCTIONS:\n\
         1. Identify every object on the desk\n\
         2. Find its GEOMETRIC CENTER, not an edge or a bounding-box corner\n\
         3. Report the pixel coordinates of that center\n\n\
         COORDINATES:\n\
         - Format [x, y], x grows left to right, y grows top to bottom\n\
         - x=0 is the leftmost pixel, x={max_x} the rightmost\n\
         - y=0 is the topmost pixel, y={max_y} the bottommost\n\
         - An object near the middle of the image sits around [{cx}, {cy}]\n\n\
         OUTPUT (valid JSON only, no markdown):\n\
         [{{\"name\": \"object_name\", \"center\": [x, y]}}]",
        cx = width / 2,
        cy = height / 2,
    )
}

/// Ask for a zone assignment of `items` under `intent`.
pub fn classification_prompt(intent: &Intent, items: &[String]) -> String {
    format!(
        "You are organizing a desk for: {intent}.\n\n\
         Items detected on the desk: {items}\n\n\
         Classification rules:\n{rules}\n\n\
         IMPORTANT: classify ONLY the items listed above. Do not add items that were not detected.\n\n\
         Return ONLY valid JSON, no markdown:\n\
         {{\"Main Work Area\": [\"item1\"], \"Support Area\": [\"item2\"], \"Edge Area\": [\"item3\"]}}",
        items = items.join(", "),
        rules = intent.rules(),
    )
}

/// Captions preceding the before, plan and after images.
pub const COMPARISON_CAPTIONS: [&str; 3] = [
    "Image 1 - BEFORE:",
    "Image 2 - PLAN:",
    "Image 3 - AFTER:",
];

/// Instructions following the three comparison images.
pub const COMPARISON_PROMPT: &str = r#"
You are evaluating how well a user organized their desk according to a plan.

You saw 3 images:
1. BEFORE: the desk before organization (rectified top-down view)
2. PLAN: the plan, with colored arrows showing where items should move
3. AFTER: the desk after the user organized it (rectified top-down view)

DESK LAYOUT (top-down):
+---------------------------------+
|   SUPPORT AREA (top 30%)        |  <- orange arrows
+---------+-----------------------+
|  EDGE   |                       |
|  AREA   |   MAIN WORK AREA      |  <- yellow arrows
| (left   |                       |
|  30%)   |                       |
|  pink   |                       |
| arrows  |                       |
+---------+-----------------------+

ZONES:
- Support Area: full-width strip along the top 30% of the desk height
- Edge Area: left 30% of the width, below the Support Area
- Main Work Area: everything right of the Edge Area and below the Support Area

ARROW COLORS:
- Orange (#FF5900): move to Support Area
- Pink (#FF0055): move to Edge Area
- Yellow: move to Main Work Area

TASK:
1. Compare BEFORE with AFTER
2. Check whether items followed the arrows in PLAN
3. For each zone, verify that items whose arrows point there now sit there
4. Assess each zone, then give an overall assessment

SCORING (0-100):
- 90-100: all or nearly all items moved as indicated
- 70-89: most items correct, one or two minor issues
- 50-69: some items correct, several not in their indicated zones
- 0-49: many items in wrong zones or not moved

Return ONLY valid JSON (no markdown):
{
  "score": <number 0-100>,
  "feedback": [
    {"zone": "Support Area", "status": "good|warning|error", "message": "at most 50 characters"},
    {"zone": "Edge Area", "status": "good|warning|error", "message": "at most 50 characters"},
    {"zone": "Main Work Area", "status": "good|warning|error", "message": "at most 50 characters"},
    {"zone": "Overall", "status": "good|warning|error", "message": "at most 50 characters"}
  ]
}

Judge whether items MOVED WHERE THE ARROWS INDICATED, not aesthetics.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_prompt_states_canvas_bounds() {
        let p = detection_prompt(640, 480);
        assert!(p.contains("Width: 640 pixels (0 to 639)"));
        assert!(p.contains("Height: 480 pixels (0 to 479)"));
        assert!(p.contains("[320, 240]"));
    }

    #[test]
    fn classification_prompt_lists_items_and_rules() {
        let items = vec!["pen".to_string(), "laptop".to_string()];
        let p = classification_prompt(&Intent::Work, &items);
        assert!(p.contains("organizing a desk for: work"));
        assert!(p.contains("pen, laptop"));
        assert!(p.contains("office supplies"));
    }
}
