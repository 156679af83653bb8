//! Fixed prompts, style suffixes and output formats.

use serde_json::{Value, json};

/// Instruction for the story script.
pub const STORY_PROMPT: &str = r#"
Hãy tạo ra một kịch bản chi tiết cho câu chuyện cổ tích Việt Nam "Cây tre trăm đốt".
Kịch bản phải được chia thành nhiều cảnh (khoảng 8-12 cảnh).
Mỗi cảnh phải có các thuộc tính sau trong một đối tượng JSON:
- "scene": số thứ tự của cảnh.
- "sceneDescription": một mô tả ngắn gọn về bối cảnh và hành động trong cảnh, dùng để tạo hình ảnh và video. Mô tả này phải chi tiết, giàu hình ảnh.
- "sceneDescriptionEn": Dịch "sceneDescription" sang tiếng Anh một cách chính xác.
- "narration": lời kể của người dẫn chuyện cho cảnh này, bằng tiếng Việt.
- "dialogue": một mảng các đối tượng, mỗi đối tượng chứa "character" (tên nhân vật, ví dụ: "Anh Khoai", "Phú ông", "Bụt", "Người dẫn chuyện") và "line" (lời thoại của nhân vật bằng tiếng Việt).

Ví dụ một cảnh:
{
  "scene": 1,
  "sceneDescription": "Một anh nông dân nghèo tên Khoai đang chăm chỉ làm việc trên cánh đồng lúa rộng lớn dưới trời nắng gắt. Lão phú ông đứng trên bờ, tay chống gậy, vẻ mặt gian xảo.",
  "sceneDescriptionEn": "A poor farmer named Khoai is working diligently in a vast rice field under the hot sun. The rich landlord stands on the bank, leaning on his cane, with a cunning expression.",
  "narration": "Ngày xửa ngày xưa, có một anh nông dân hiền lành, khỏe mạnh tên là Khoai. Anh phải lòng con gái của lão phú ông trong làng và đến xin làm thuê để được cưới nàng làm vợ.",
  "dialogue": []
}

Hãy đảm bảo câu chuyện đầy đủ các tình tiết chính: lời hứa của phú ông, anh Khoai vào rừng, sự giúp đỡ của Bụt, câu thần chú "khắc nhập, khắc xuất", và cái kết trừng trị lão phú ông.
Chỉ trả về một mảng JSON hợp lệ, không có bất kỳ văn bản nào khác.
"#;

/// Folk-art framing appended to every image prompt.
pub const IMAGE_STYLE_SUFFIX: &str =
    ", in the style of a Vietnamese fairy tale illustration, vibrant colors, folk art.";

/// Cinematic framing appended to every video prompt.
pub const VIDEO_STYLE_SUFFIX: &str = ", cinematic, fairy tale animation";

/// Aspect ratio of illustrations and clips.
pub const ASPECT_RATIO: &str = "16:9";

/// Encoding of generated illustrations.
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

/// Resolution of generated clips.
pub const VIDEO_RESOLUTION: &str = "720p";

/// MIME type assumed for downloaded clips when the server does not say.
pub const VIDEO_MIME_TYPE: &str = "video/mp4";

/// Full image prompt for a scene description.
pub fn image_prompt(description: &str) -> String {
    format!("{description}{IMAGE_STYLE_SUFFIX}")
}

/// Full video prompt for a scene description.
pub fn video_prompt(description: &str) -> String {
    format!("{description}{VIDEO_STYLE_SUFFIX}")
}

/// Response schema the script must satisfy.
pub fn script_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "scene": { "type": "NUMBER" },
                "sceneDescription": { "type": "STRING" },
                "sceneDescriptionEn": { "type": "STRING" },
                "narration": { "type": "STRING" },
                "dialogue": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "character": { "type": "STRING" },
                            "line": { "type": "STRING" }
                        },
                        "required": ["character", "line"]
                    }
                }
            },
            "required": ["scene", "sceneDescription", "sceneDescriptionEn", "narration", "dialogue"]
        }
    })
}
