//! Elm source emission.
//!
//! The renderer only lays out text: every name and expression comes from the
//! model already resolved.

mod enumeration;
mod message;
mod oneof;

use crate::model::FileModel;

/// Blank lines between top-level declarations, as elm-format lays them out.
const DECL_SEPARATOR: &str = "\n\n\n";

const BANNER: &str = "\
-- DO NOT EDIT
-- AUTOGENERATED BY THE ELM PROTOCOL BUFFER COMPILER
";

const HELPERS: &str = r#"-- noop is here because I don't know elm well enough to know how to provide
-- a (a -> a) function to JE.list without it.
noop : JE.Value -> JE.Value
noop v =
    v


valueList : List JE.Value -> JE.Value
valueList l =
    JE.list noop l


custom : JD.Decoder a -> JD.Decoder (a -> b) -> JD.Decoder b
custom =
    JD.map2 (|>)


idxWithDefault : Int -> JD.Decoder a -> a -> JD.Decoder (a -> b) -> JD.Decoder b
idxWithDefault idx decoder default =
    JD.map2 (|>) (JD.oneOf [ JD.index idx decoder, JD.succeed default ])


maybeEncoder : (a -> JE.Value) -> Maybe a -> JE.Value
maybeEncoder enc v =
    case v of
        Nothing ->
            JE.null

        Just av ->
            enc av


type Field a
    = Null
    | Present a


{-| Oneof members share the backing array with the rest of the message, and
unset members show up as empty (null) slots. A member decoder has to fail on
null so that the next member gets its turn.
-}
failOnNull : JD.Decoder a -> JD.Decoder a
failOnNull decoder =
    JD.oneOf
        [ JD.null Null
        , JD.map Present decoder
        ]
        |> JD.andThen
            (\v ->
                case v of
                    Null ->
                        JD.fail "received null value"

                    Present fv ->
                        JD.succeed fv
            )"#;

const MAP_HELPERS: &str = r#"-- Map fields are stored as a list of [ key, value ] pairs.
mapEntries : Int -> JD.Decoder comparable -> JD.Decoder a -> JD.Decoder (Dict.Dict comparable a -> b) -> JD.Decoder b
mapEntries idx keyDecoder valueDecoder =
    idxWithDefault idx
        (JD.map Dict.fromList
            (JD.list (JD.map2 Tuple.pair (JD.index 0 keyDecoder) (JD.index 1 valueDecoder)))
        )
        Dict.empty


mapEntriesFieldEncoder : (comparable -> JE.Value) -> (a -> JE.Value) -> Dict.Dict comparable a -> JE.Value
mapEntriesFieldEncoder keyEncoder valueEncoder dict =
    Dict.toList dict
        |> List.map (\( key, value ) -> valueList [ keyEncoder key, valueEncoder value ])
        |> valueList"#;

/// Render a file model as a complete Elm module.
pub fn render_file(model: &FileModel) -> String {
    let mut gen = ElmGenerator::new();
    gen.push_header(model);

    for enum_node in &model.enums {
        gen.buf.push_str(DECL_SEPARATOR);
        gen.push_enum(enum_node);
    }
    for message in &model.messages {
        gen.buf.push_str(DECL_SEPARATOR);
        gen.push_message(message);
    }

    gen.buf.push('\n');
    gen.buf
}

/// Accumulates Elm source text.
pub struct ElmGenerator {
    buf: String,
}

impl ElmGenerator {
    fn new() -> Self {
        Self { buf: String::new() }
    }

    fn push_header(&mut self, model: &FileModel) {
        self.buf
            .push_str(&format!("module {} exposing (..)\n\n", model.module_name));
        self.buf.push_str(BANNER);
        self.buf
            .push_str(&format!("-- source file: {}\n\n", model.source_file));

        self.buf.push_str("import Protobuf exposing (..)\n\n");
        self.buf.push_str("import Json.Decode as JD\n");
        self.buf.push_str("import Json.Encode as JE\n");
        if model.uses_dict {
            self.buf.push_str("import Dict\n");
        }
        for import in &model.imports {
            self.buf.push_str(&format!("import {} exposing (..)\n", import));
        }

        self.buf.push_str("\n\n");
        self.buf.push_str(HELPERS);
        if model.uses_dict {
            self.buf.push_str(DECL_SEPARATOR);
            self.buf.push_str(MAP_HELPERS);
        }
    }
}
