//! Outbound client commands.
//!
//! Every command is a [`Record`]: the packet id and sub-ids are ordinary
//! fields with their usual values as defaults, so a command can be built with
//! struct update syntax and still round-trips byte for byte.

use std::sync::OnceLock;

use cursor::TextFormat;
use serde::Serialize;

use crate::error::{DecodeResult, EncodeError, EncodeResult};
use crate::field::{encode_fields, FieldKind, FieldValue, FieldValues, Record};
use crate::{FieldDef, FieldSchema};

macro_rules! command {
    (
        $(#[$meta:meta])*
        $name:ident ($text:expr) {
            $($field:ident: $ty:ident = $default:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
        pub struct $name {
            $(pub $field: $ty),+
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $($field: $default),+
                }
            }
        }

        impl Record for $name {
            fn schema() -> &'static FieldSchema {
                static SCHEMA: OnceLock<FieldSchema> = OnceLock::new();
                SCHEMA.get_or_init(|| {
                    FieldSchema::new_unchecked(
                        vec![$(FieldDef::new(stringify!($field), <$ty as FieldKind>::TYPE)),+],
                        $text,
                    )
                })
            }

            fn to_values(&self) -> Vec<FieldValue> {
                vec![$(FieldValue::from(self.$field.clone())),+]
            }

            fn from_values(mut values: FieldValues<'_>) -> DecodeResult<Self> {
                Ok(Self {
                    $($field: values.take()?),+
                })
            }
        }
    };
}

command! {
    /// Targets or interacts with an object.
    Action(TextFormat::UTF8_PREFIXED) {
        packet_id: u8 = 0x1F,
        object_id: i32 = 0,
        origin_x: i32 = 0,
        origin_y: i32 = 0,
        origin_z: i32 = 0,
        action_id: u8 = 0,
    }
}

command! {
    /// Sends an HTML bypass string to the server.
    RequestBypassToServer(TextFormat::UTF16_TERMINATED) {
        packet_id: u8 = 0x23,
        command: String = "menu_select?ask=-10303&reply=1".to_string(),
    }
}

command! {
    /// Asks the commission house for listings of one item.
    RequestCommissionBuyInfo(TextFormat::UTF8_PREFIXED) {
        packet_id: u8 = 0xD0,
        sub_packet_id: u16 = 0x009E,
        unknown1: i32 = 1,
        item_type: i32 = 0,
        unknown2: i64 = -1,
        unknown3: u16 = 0,
    }
}

command! {
    RequestItemList(TextFormat::UTF8_PREFIXED) {
        packet_id: u8 = 0xD0,
        sub_packet_id: u16 = 0x0214,
        unknown2: u16 = 0,
        unknown3: u8 = 0x03,
        item_type: u8 = 0,
        unknown4: u16 = 0x00FF,
    }
}

command! {
    /// Buys from a private store.
    RequestPrivateStoreBuy(TextFormat::UTF8_PREFIXED) {
        packet_id: u8 = 0x32,
        sub_packet_id: u16 = 0x0001,
        vendor_object_id: i32 = 0,
        item_type: i32 = 0,
        count: i64 = 1,
    }
}

command! {
    RequestPrivateStoreWindow(TextFormat::UTF8_PREFIXED) {
        packet_id: u8 = 0xD0,
        sub_packet_id: u8 = 0x15,
        unknown: u8 = 0x02,
    }
}

command! {
    /// Buys a world exchange listing.
    RequestWorldExchangeBuy(TextFormat::UTF8_PREFIXED) {
        packet_id: u8 = 0xFE,
        sub_packet_id: u16 = 0x0001,
        world_exchange_id: i32 = 0,
        item_type: i32 = 0,
        count: i64 = 1,
    }
}

command! {
    WorldExchangeSearchItem(TextFormat::UTF8_PREFIXED) {
        packet_id: u8 = 0xD0,
        sub_packet_id: u16 = 0x023F,
        item_type: u16 = 0,
        unknown2: u16 = 0x0002,
        unknown3: u32 = 0,
        unknown4: u16 = 0,
        unknown5: u8 = 0,
    }
}

command! {
    /// Chat message.
    Say2(TextFormat::UTF16_TERMINATED) {
        packet_id: u8 = 0x49,
        text: String = String::new(),
        chat_type: i32 = 0,
        target: u8 = 0,
    }
}

/// A command known by name, for callers that build commands from text.
#[derive(Debug, Clone, Copy)]
pub struct CommandInfo {
    pub name: &'static str,
    schema: fn() -> &'static FieldSchema,
    defaults: fn() -> Vec<FieldValue>,
}

impl CommandInfo {
    #[must_use]
    pub fn schema(&self) -> &'static FieldSchema {
        (self.schema)()
    }

    /// Encodes the command with its defaults overridden by `overrides`
    /// (`field name`, `value text`) pairs.
    pub fn encode<'a>(
        &self,
        overrides: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> EncodeResult<Vec<u8>> {
        let schema = self.schema();
        let mut values = (self.defaults)();
        for (name, text) in overrides {
            let index = schema
                .fields()
                .iter()
                .position(|field| field.name == name)
                .ok_or_else(|| EncodeError::UnknownField {
                    name: name.to_string(),
                })?;
            let ty = schema.fields()[index].ty;
            values[index] = FieldValue::parse(ty, text).ok_or_else(|| EncodeError::TypeMismatch {
                field: name.to_string(),
                expected: ty,
            })?;
        }
        encode_fields(schema, &values)
    }
}

fn info<R: Record + Default>(name: &'static str) -> CommandInfo {
    CommandInfo {
        name,
        schema: R::schema,
        defaults: || R::default().to_values(),
    }
}

/// Every outbound command.
pub fn commands() -> &'static [CommandInfo] {
    static COMMANDS: OnceLock<Vec<CommandInfo>> = OnceLock::new();
    COMMANDS.get_or_init(|| {
        vec![
            info::<Action>("Action"),
            info::<RequestBypassToServer>("RequestBypassToServer"),
            info::<RequestCommissionBuyInfo>("RequestCommissionBuyInfo"),
            info::<RequestItemList>("RequestItemList"),
            info::<RequestPrivateStoreBuy>("RequestPrivateStoreBuy"),
            info::<RequestPrivateStoreWindow>("RequestPrivateStoreWindow"),
            info::<RequestWorldExchangeBuy>("RequestWorldExchangeBuy"),
            info::<WorldExchangeSearchItem>("WorldExchangeSearchItem"),
            info::<Say2>("Say2"),
        ]
    })
}

/// Looks up a command by name, ignoring ASCII case.
#[must_use]
pub fn find(name: &str) -> Option<&'static CommandInfo> {
    commands()
        .iter()
        .find(|command| command.name.eq_ignore_ascii_case(name))
}
