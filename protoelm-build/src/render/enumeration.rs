use std::collections::HashSet;

use crate::model::EnumNode;

use super::ElmGenerator;

impl ElmGenerator {
    /// Custom type, decoder, default constant and encoder for an enum.
    pub(super) fn push_enum(&mut self, node: &EnumNode) {
        let name = &node.name;
        let default = node.default_variant();

        self.buf.push_str(&format!("type {}\n", name));
        for (i, variant) in node.variants.iter().enumerate() {
            let sep = if i == 0 { '=' } else { '|' };
            self.buf
                .push_str(&format!("    {} {} -- {}\n", sep, variant.name, variant.number));
        }

        self.buf.push_str("\n\n");
        self.buf
            .push_str(&format!("{} : JD.Decoder {}\n", node.decoder, name));
        self.buf.push_str(&format!("{} =\n", node.decoder));
        self.buf.push_str("    let\n        lookup v =\n            case v of\n");
        // Aliased values decode to the first variant declared with the number.
        let mut seen = HashSet::new();
        for variant in node.variants.iter().filter(|v| seen.insert(v.number)) {
            self.buf.push_str(&format!(
                "                {} ->\n                    {}\n\n",
                variant.number, variant.name
            ));
        }
        self.buf
            .push_str(&format!("                _ ->\n                    {}\n", default.name));
        self.buf.push_str("    in\n    JD.map lookup JD.int\n\n\n");

        self.buf
            .push_str(&format!("{} : {}\n", node.default_name, name));
        self.buf
            .push_str(&format!("{} =\n    {}\n\n\n", node.default_name, default.name));

        self.buf
            .push_str(&format!("{} : {} -> JE.Value\n", node.encoder, name));
        self.buf.push_str(&format!("{} v =\n", node.encoder));
        self.buf.push_str("    let\n        lookup s =\n            case s of\n");
        for (i, variant) in node.variants.iter().enumerate() {
            if i > 0 {
                self.buf.push('\n');
            }
            self.buf.push_str(&format!(
                "                {} ->\n                    {}\n",
                variant.name, variant.number
            ));
        }
        self.buf.push_str("    in\n    JE.int <| lookup v");
    }
}
