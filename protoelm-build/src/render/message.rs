use crate::model::MessageNode;

use super::{ElmGenerator, DECL_SEPARATOR};

impl ElmGenerator {
    /// Record alias, defaults, decoder and encoder for a message, followed by
    /// its oneofs, enums and nested messages.
    pub(super) fn push_message(&mut self, node: &MessageNode) {
        self.push_record(node);
        self.buf.push_str(DECL_SEPARATOR);
        self.push_defaults(node);
        self.buf.push_str(DECL_SEPARATOR);
        self.push_decoder(node);
        self.buf.push_str(DECL_SEPARATOR);
        self.push_encoder(node);

        for oneof in &node.oneofs {
            self.buf.push_str(DECL_SEPARATOR);
            self.push_oneof(oneof);
        }
        for enum_node in &node.enums {
            self.buf.push_str(DECL_SEPARATOR);
            self.push_enum(enum_node);
        }
        for nested in &node.messages {
            self.buf.push_str(DECL_SEPARATOR);
            self.push_message(nested);
        }
    }

    fn push_record(&mut self, node: &MessageNode) {
        self.buf.push_str(&format!("type alias {} =\n", node.name));
        if node.fields.is_empty() {
            self.buf.push_str("    {}");
            return;
        }
        for (i, field) in node.fields.iter().enumerate() {
            let sep = if i == 0 { '{' } else { ',' };
            self.buf
                .push_str(&format!("    {} {} : {}", sep, field.name, field.type_expr));
            if let Some(number) = field.number {
                self.buf.push_str(&format!(" -- {}", number));
            }
            self.buf.push('\n');
        }
        self.buf.push_str("    }");
    }

    fn push_defaults(&mut self, node: &MessageNode) {
        self.buf
            .push_str(&format!("{} : {}\n", node.default_name, node.name));
        self.buf.push_str(&format!("{} =\n", node.default_name));
        if node.fields.is_empty() {
            self.buf.push_str("    {}");
            return;
        }
        for (i, field) in node.fields.iter().enumerate() {
            let sep = if i == 0 { '{' } else { ',' };
            self.buf
                .push_str(&format!("    {} {} = {}\n", sep, field.name, field.default));
        }
        self.buf.push_str("    }");
    }

    fn push_decoder(&mut self, node: &MessageNode) {
        self.buf.push_str(&format!(
            "-- {} is used to decode protobuf messages from ports, following the javascript\n\
             -- array format.\n",
            node.decoder
        ));
        self.buf
            .push_str(&format!("{} : JD.Decoder {}\n", node.decoder, node.name));
        self.buf.push_str(&format!("{} =\n", node.decoder));
        self.buf
            .push_str(&format!("    JD.lazy <| \\_ -> decode {}", node.name));
        for field in &node.fields {
            self.buf.push_str(&format!("\n        |> {}", field.decoder));
        }
    }

    fn push_encoder(&mut self, node: &MessageNode) {
        self.buf.push_str(&format!(
            "-- {} is used to encode protobuf messages for ports, so that javascript code\n\
             -- may use the value in the message constructor.\n",
            node.encoder
        ));
        self.buf
            .push_str(&format!("{} : {} -> JE.Value\n", node.encoder, node.name));
        self.buf.push_str(&format!("{} v =\n", node.encoder));
        if node.encode_plan.is_empty() {
            self.buf.push_str("    valueList []");
            return;
        }
        // One entry per field number, JE.null where none is declared.
        self.buf.push_str("    valueList\n");
        for (i, slot) in node.encode_plan.iter().enumerate() {
            let sep = if i == 0 { '[' } else { ',' };
            self.buf.push_str(&format!("        {} {}\n", sep, slot.expr()));
        }
        self.buf.push_str("        ]");
    }
}
