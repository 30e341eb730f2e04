//! End-to-end tests for the plugin: encoded request in, encoded response out.

use protoelm::varint::decode_varint;
use protoelm::wire::{
    decode_bytes, decode_key, decode_string, encode_bytes_field, encode_string_field,
    encode_uint64_field, skip_field,
};

// descriptor.proto field types and labels.
const TYPE_DOUBLE: u64 = 1;
const TYPE_INT64: u64 = 3;
const TYPE_INT32: u64 = 5;
const TYPE_BOOL: u64 = 8;
const TYPE_STRING: u64 = 9;
const TYPE_GROUP: u64 = 10;
const TYPE_MESSAGE: u64 = 11;
const TYPE_ENUM: u64 = 14;

const LABEL_OPTIONAL: u64 = 1;
const LABEL_REPEATED: u64 = 3;

/// Builds a protobuf message one field at a time.
#[derive(Clone, Default)]
struct Msg(Vec<u8>);

impl Msg {
    fn string(mut self, tag: u32, value: &str) -> Self {
        encode_string_field(tag, value, &mut self.0).unwrap();
        self
    }

    fn varint(mut self, tag: u32, value: u64) -> Self {
        encode_uint64_field(tag, value, &mut self.0).unwrap();
        self
    }

    fn message(mut self, tag: u32, value: Msg) -> Self {
        encode_bytes_field(tag, &value.0, &mut self.0).unwrap();
        self
    }
}

fn field(name: &str, number: u64, label: u64, kind: u64) -> Msg {
    Msg::default()
        .string(1, name)
        .varint(3, number)
        .varint(4, label)
        .varint(5, kind)
}

fn typed_field(name: &str, number: u64, label: u64, kind: u64, type_name: &str) -> Msg {
    field(name, number, label, kind).string(6, type_name)
}

fn deprecated() -> Msg {
    Msg::default().varint(3, 1)
}

struct Response {
    error: Option<String>,
    supported_features: u64,
    files: Vec<(String, String)>,
}

fn decode_response(data: &[u8]) -> Response {
    let mut buf = data;
    let mut response = Response {
        error: None,
        supported_features: 0,
        files: Vec::new(),
    };
    while !buf.is_empty() {
        let (tag, wire_type) = decode_key(&mut buf).unwrap();
        match tag {
            1 => response.error = Some(decode_string(&mut buf).unwrap()),
            2 => response.supported_features = decode_varint(&mut buf).unwrap(),
            15 => {
                let mut file = decode_bytes(&mut buf).unwrap();
                let (mut name, mut content) = (String::new(), String::new());
                while !file.is_empty() {
                    let (tag, wire_type) = decode_key(&mut file).unwrap();
                    match tag {
                        1 => name = decode_string(&mut file).unwrap(),
                        15 => content = decode_string(&mut file).unwrap(),
                        _ => skip_field(&mut file, wire_type).unwrap(),
                    }
                }
                response.files.push((name, content));
            }
            _ => skip_field(&mut buf, wire_type).unwrap(),
        }
    }
    response
}

fn run(parameter: Option<&str>, files: Vec<Msg>) -> Response {
    let mut request = Msg::default();
    if let Some(parameter) = parameter {
        request = request.string(2, parameter);
    }
    for file in files {
        request = request.message(15, file);
    }
    let output = protoelm_build::execute(&request.0).unwrap();
    decode_response(&output)
}

fn content_of<'a>(response: &'a Response, name: &str) -> &'a str {
    response
        .files
        .iter()
        .find(|(file, _)| file == name)
        .map(|(_, content)| content.as_str())
        .unwrap_or_else(|| panic!("{} was not generated", name))
}

/// `shop/item.proto`: an enum, a message exercising every field shape, and a
/// nested message.
fn item_file() -> Msg {
    let status = Msg::default()
        .string(1, "Status")
        .message(2, Msg::default().string(1, "STATUS_ACTIVE").varint(2, 0))
        .message(2, Msg::default().string(1, "STATUS_ARCHIVED").varint(2, 1));

    let prices_entry = Msg::default()
        .string(1, "PricesEntry")
        .message(2, field("key", 1, LABEL_OPTIONAL, TYPE_STRING))
        .message(2, field("value", 2, LABEL_OPTIONAL, TYPE_INT32))
        .message(7, Msg::default().varint(7, 1));

    let note = Msg::default()
        .string(1, "Note")
        .message(2, field("body", 1, LABEL_OPTIONAL, TYPE_STRING));

    let item = Msg::default()
        .string(1, "Item")
        .message(2, field("name", 1, LABEL_OPTIONAL, TYPE_STRING))
        .message(2, field("quantity", 2, LABEL_OPTIONAL, TYPE_INT64))
        .message(2, field("tags", 4, LABEL_REPEATED, TYPE_STRING))
        .message(
            2,
            typed_field("prices", 5, LABEL_REPEATED, TYPE_MESSAGE, ".shop.Item.PricesEntry"),
        )
        .message(
            2,
            typed_field("parent", 6, LABEL_OPTIONAL, TYPE_MESSAGE, ".shop.Item"),
        )
        .message(
            2,
            field("code", 7, LABEL_OPTIONAL, TYPE_STRING).varint(9, 0),
        )
        .message(
            2,
            typed_field("status", 8, LABEL_OPTIONAL, TYPE_ENUM, ".shop.Status").varint(9, 0),
        )
        .message(
            2,
            typed_field(
                "created_at",
                9,
                LABEL_OPTIONAL,
                TYPE_MESSAGE,
                ".google.protobuf.Timestamp",
            ),
        )
        .message(
            2,
            field("legacy", 10, LABEL_OPTIONAL, TYPE_BOOL).message(8, deprecated()),
        )
        .message(3, prices_entry)
        .message(3, note)
        .message(8, Msg::default().string(1, "choice"));

    Msg::default()
        .string(1, "shop/item.proto")
        .string(2, "shop")
        .string(3, "google/protobuf/timestamp.proto")
        .message(4, item)
        .message(5, status)
        .string(12, "proto3")
}

fn timestamp_file() -> Msg {
    Msg::default()
        .string(1, "google/protobuf/timestamp.proto")
        .string(2, "google.protobuf")
        .message(4, Msg::default().string(1, "Timestamp"))
}

#[test]
fn test_generates_item_module() {
    let response = run(None, vec![timestamp_file(), item_file()]);
    assert_eq!(response.error, None);
    assert_eq!(response.supported_features, 1);
    assert_eq!(response.files.len(), 1);

    let content = content_of(&response, "Shop/Item.elm");
    assert!(content.starts_with("module Shop.Item exposing (..)\n"));
    assert!(content.contains("-- source file: shop/item.proto\n"));
    assert!(content.contains("import Dict\n"));
    assert!(!content.contains("import Google.Protobuf.Timestamp"));

    assert!(content.contains("type Status\n    = StatusActive -- 0\n    | StatusArchived -- 1\n"));

    let record = "\
type alias Item =
    { name : String -- 1
    , quantity : Int -- 2
    , tags : List String -- 4
    , prices : Dict.Dict String Int -- 5
    , parent : Maybe Item -- 6
    , createdAt : Maybe Timestamp -- 9
    , legacy : Bool -- 10
    , choice : Item_Choice
    }";
    assert!(content.contains(record), "{}", content);

    assert!(content.contains("    , prices = Dict.empty\n"));
    assert!(content.contains("    , choice = Item_ChoiceUnspecified\n"));

    let decoder = "\
itemPortDecoder : JD.Decoder Item
itemPortDecoder =
    JD.lazy <| \\_ -> decode Item
        |> idxWithDefault 0 JD.string \"\"
        |> idxWithDefault 1 intDecoder 0
        |> idxWithDefault 3 (JD.list JD.string) []
        |> mapEntries 4 JD.string intDecoder
        |> idxWithDefault 5 (JD.maybe itemPortDecoder) Nothing
        |> idxWithDefault 8 (JD.maybe timestampDecoder) Nothing
        |> idxWithDefault 9 JD.bool False
        |> custom item_ChoicePortDecoder";
    assert!(content.contains(decoder), "{}", content);

    let encoder = "\
itemPortEncoder : Item -> JE.Value
itemPortEncoder v =
    valueList
        [ JE.string v.name
        , numericStringEncoder v.quantity
        , JE.null
        , JE.list JE.string v.tags
        , mapEntriesFieldEncoder JE.string JE.int v.prices
        , maybeEncoder itemPortEncoder v.parent
        , item_ChoicePortEncoder 7 v.choice
        , item_ChoicePortEncoder 8 v.choice
        , maybeEncoder timestampEncoder v.createdAt
        , JE.bool v.legacy
        ]";
    assert!(content.contains(encoder), "{}", content);

    assert!(content.contains("    = Item_ChoiceUnspecified\n    | Item_Code String\n    | Item_Status Status\n"));
    assert!(content.contains("JD.map Item_Status (JD.index 7 (failOnNull statusPortDecoder))"));
    assert!(content.contains("type alias Item_Note =\n    { body : String -- 1\n    }"));
    assert!(!content.contains("PricesEntry"));

    let item_at = content.find("type alias Item =").unwrap();
    let note_at = content.find("type alias Item_Note =").unwrap();
    let status_at = content.find("type Status\n").unwrap();
    assert!(status_at < item_at && item_at < note_at);
}

#[test]
fn test_parameters() {
    let response = run(
        Some("module-prefix=Api.Gen,remove-deprecated"),
        vec![timestamp_file(), item_file()],
    );
    assert_eq!(response.error, None);

    let content = content_of(&response, "Shop/Item.elm");
    assert!(content.starts_with("module Api.Gen.Shop.Item exposing (..)\n"));
    assert!(!content.contains("legacy"));
    assert!(content.contains("        , maybeEncoder timestampEncoder v.createdAt\n        ]"));
}

#[test]
fn test_excluded_dependency_is_not_imported() {
    let money = Msg::default()
        .string(1, "common/money.proto")
        .message(4, Msg::default().string(1, "Money"));
    let cart = Msg::default()
        .string(1, "cart.proto")
        .string(3, "common/money.proto")
        .string(3, "vendor/ext.proto")
        .message(
            4,
            Msg::default()
                .string(1, "Cart")
                .message(2, typed_field("total", 1, LABEL_OPTIONAL, TYPE_MESSAGE, ".Money")),
        );
    let ext = Msg::default().string(1, "vendor/ext.proto");

    let response = run(Some("exclude=vendor/ext.proto"), vec![money, ext, cart]);
    assert_eq!(response.error, None);
    let names: Vec<_> = response.files.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, ["Common/Money.elm", "Cart.elm"]);

    let content = content_of(&response, "Cart.elm");
    assert!(content.contains("import Common.Money exposing (..)\n"));
    assert!(!content.contains("import Vendor.Ext"));
    assert!(content.contains("    { total : Maybe Money -- 1\n"));
}

#[test]
fn test_unsupported_type_fails_whole_request() {
    let ok = Msg::default()
        .string(1, "a.proto")
        .message(4, Msg::default().string(1, "A"));
    let bad = Msg::default().string(1, "b.proto").message(
        4,
        Msg::default()
            .string(1, "B")
            .message(2, field("legacy", 1, LABEL_OPTIONAL, TYPE_GROUP)),
    );

    let response = run(None, vec![ok, bad]);
    assert_eq!(
        response.error.as_deref(),
        Some("Unsupported type 10 for field \"legacy\"")
    );
    assert!(response.files.is_empty());
}

#[test]
fn test_unknown_parameter_is_reported() {
    let response = run(Some("frobnicate"), vec![item_file()]);
    assert_eq!(response.error.as_deref(), Some("unknown parameter: \"frobnicate\""));
    assert!(response.files.is_empty());
}

#[test]
fn test_proto2_defaults() {
    let settings = Msg::default().string(1, "Settings").message(
        2,
        field("ratio", 1, LABEL_OPTIONAL, TYPE_DOUBLE).string(7, "-1.5"),
    );
    let file = Msg::default()
        .string(1, "settings.proto")
        .string(12, "proto2")
        .message(4, settings);

    let response = run(None, vec![file]);
    assert_eq!(response.error, None);
    let content = content_of(&response, "Settings.elm");
    assert!(content.contains("    { ratio = (-1.5)\n"));
    assert!(content.contains("|> idxWithDefault 0 JD.float (-1.5)\n"));
}

#[test]
fn test_default_naming_removed_value_in_other_file() {
    let mode = Msg::default()
        .string(1, "Mode")
        .message(2, Msg::default().string(1, "STANDARD").varint(2, 0))
        .message(
            2,
            Msg::default()
                .string(1, "LEGACY")
                .varint(2, 1)
                .message(3, Msg::default().varint(1, 1)),
        );
    let modes = Msg::default()
        .string(1, "modes.proto")
        .string(2, "cfg")
        .message(5, mode);
    let settings = Msg::default()
        .string(1, "settings.proto")
        .string(2, "cfg")
        .string(3, "modes.proto")
        .string(12, "proto2")
        .message(
            4,
            Msg::default().string(1, "Settings").message(
                2,
                typed_field("mode", 1, LABEL_OPTIONAL, TYPE_ENUM, ".cfg.Mode").string(7, "LEGACY"),
            ),
        );

    let response = run(None, vec![modes.clone(), settings.clone()]);
    assert_eq!(response.error, None);
    assert!(content_of(&response, "Settings.elm").contains("    { mode = Legacy\n"));

    let response = run(Some("remove-deprecated"), vec![modes, settings]);
    assert_eq!(response.error, None);
    assert!(!content_of(&response, "Modes.elm").contains("Legacy"));
    let content = content_of(&response, "Settings.elm");
    assert!(content.contains("    { mode = modeDefault\n"));
    assert!(content.contains("|> idxWithDefault 0 modePortDecoder modeDefault\n"));
}

#[test]
fn test_bool_map_key_fails_request() {
    let entry = Msg::default()
        .string(1, "FlagsEntry")
        .message(2, field("key", 1, LABEL_OPTIONAL, TYPE_BOOL))
        .message(2, field("value", 2, LABEL_OPTIONAL, TYPE_STRING))
        .message(7, Msg::default().varint(7, 1));
    let file = Msg::default().string(1, "flags.proto").message(
        4,
        Msg::default()
            .string(1, "Flags")
            .message(
                2,
                typed_field("flags", 1, LABEL_REPEATED, TYPE_MESSAGE, ".Flags.FlagsEntry"),
            )
            .message(3, entry),
    );

    let response = run(None, vec![file]);
    assert_eq!(
        response.error.as_deref(),
        Some("Map field \"flags\" has key type Bool, which cannot be a Dict key")
    );
    assert!(response.files.is_empty());
}

#[test]
fn test_output_is_deterministic() {
    let first = run(None, vec![timestamp_file(), item_file()]);
    let second = run(None, vec![timestamp_file(), item_file()]);
    assert_eq!(first.files, second.files);
}
