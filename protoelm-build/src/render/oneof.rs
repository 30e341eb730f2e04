use crate::model::OneofNode;

use super::ElmGenerator;

impl ElmGenerator {
    /// Custom type, decoder and slot encoder for a oneof.
    pub(super) fn push_oneof(&mut self, node: &OneofNode) {
        let name = &node.name;

        self.buf.push_str(&format!("type {}\n", name));
        self.buf.push_str(&format!("    = {}\n", node.unspecified));
        for variant in &node.variants {
            self.buf
                .push_str(&format!("    | {} {}\n", variant.name, variant.type_expr));
        }

        // Members are tried in order; nothing set decodes to Unspecified.
        self.buf.push_str("\n\n");
        self.buf
            .push_str(&format!("{} : JD.Decoder {}\n", node.decoder, name));
        self.buf.push_str(&format!("{} =\n", node.decoder));
        self.buf.push_str("    JD.lazy <| \\_ -> JD.oneOf\n");
        for (i, variant) in node.variants.iter().enumerate() {
            let sep = if i == 0 { '[' } else { ',' };
            self.buf
                .push_str(&format!("        {} {}\n", sep, variant.decoder));
        }
        let sep = if node.variants.is_empty() { '[' } else { ',' };
        self.buf
            .push_str(&format!("        {} JD.succeed {}\n", sep, node.unspecified));
        self.buf.push_str("        ]\n\n\n");

        self.buf
            .push_str(&format!("{} : Int -> {} -> JE.Value\n", node.encoder, name));
        self.buf.push_str(&format!("{} idx v =\n", node.encoder));
        self.buf.push_str("    case v of\n");
        self.buf
            .push_str(&format!("        {} ->\n            JE.null", node.unspecified));
        for variant in &node.variants {
            self.buf.push_str(&format!(
                "\n\n        {} x ->\n            {}",
                variant.name, variant.encoder
            ));
        }
    }
}
