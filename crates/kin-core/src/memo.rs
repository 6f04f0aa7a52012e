//! Transaction memos.
//!
//! A memo is either free text or a [`KinBinaryMemo`]: 32 bytes packed LSB
//! first that identify the app and the kind of transfer.
//!
//! ```text
//! bits   0..2    magic byte indicator   < 4
//! bits   2..5    version                < 8
//! bits   5..10   transfer type id       < 32
//! bits  10..26   app index              < 65,536
//! bits  26..256  foreign key            230 bits
//! ```
//!
//! On the ledger a binary memo travels as the base64 text of its 32 bytes
//! inside a memo-program instruction.

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use kin_solana::programs::memo;
use kin_solana::Instruction;

use crate::error::KinError;
use crate::types::AppIndex;

pub const MEMO_LENGTH: usize = 32;
pub const FOREIGN_KEY_LENGTH: usize = 29;

const MAX_MAGIC_BYTE: u8 = 1 << 2;
const MAX_VERSION: u8 = 1 << 3;

/// Why a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TransferType {
    /// When none of the other types fit.
    None = 0,
    /// Kin paid to a user for a performed action.
    Earn = 1,
    /// Kin paid for a purchase.
    Spend = 2,
    /// Kin moved between users.
    P2p = 3,
}

impl TryFrom<u8> for TransferType {
    type Error = KinError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Earn),
            2 => Ok(Self::Spend),
            3 => Ok(Self::P2p),
            other => Err(KinError::InvalidTypeId(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KinBinaryMemo {
    magic_byte: u8,
    version: u8,
    transfer_type: TransferType,
    app_index: u16,
    foreign_key: [u8; FOREIGN_KEY_LENGTH],
}

impl KinBinaryMemo {
    /// Build a memo. `foreign_key` is zero-padded or truncated to 29 bytes,
    /// and the top two bits of the last byte are dropped since only 230 bits
    /// fit.
    pub fn new(
        magic_byte: u8,
        version: u8,
        transfer_type: TransferType,
        app_index: u16,
        foreign_key: &[u8],
    ) -> Result<Self, KinError> {
        if magic_byte >= MAX_MAGIC_BYTE {
            return Err(KinError::InvalidMagicByte(magic_byte));
        }
        if version >= MAX_VERSION {
            return Err(KinError::InvalidVersion(version));
        }

        let mut padded = [0u8; FOREIGN_KEY_LENGTH];
        let len = foreign_key.len().min(FOREIGN_KEY_LENGTH);
        padded[..len].copy_from_slice(&foreign_key[..len]);
        padded[FOREIGN_KEY_LENGTH - 1] &= 0x3f;

        Ok(Self {
            magic_byte,
            version,
            transfer_type,
            app_index,
            foreign_key: padded,
        })
    }

    /// The memo the SDK attaches to its own transactions: magic byte 1,
    /// version 0, no foreign key.
    pub fn for_app(transfer_type: TransferType, app_index: AppIndex) -> Self {
        Self {
            magic_byte: 1,
            version: 0,
            transfer_type,
            app_index: app_index.0,
            foreign_key: [0u8; FOREIGN_KEY_LENGTH],
        }
    }

    pub fn magic_byte(&self) -> u8 {
        self.magic_byte
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn transfer_type(&self) -> TransferType {
        self.transfer_type
    }

    pub fn app_index(&self) -> AppIndex {
        AppIndex(self.app_index)
    }

    pub fn foreign_key(&self) -> &[u8; FOREIGN_KEY_LENGTH] {
        &self.foreign_key
    }

    pub fn foreign_key_base64(&self) -> String {
        BASE64_STANDARD.encode(self.foreign_key)
    }

    pub fn encode(&self) -> [u8; MEMO_LENGTH] {
        let type_id = self.transfer_type as u8;
        let mut out = [0u8; MEMO_LENGTH];

        out[0] = self.magic_byte | (self.version << 2) | ((type_id & 0x07) << 5);
        out[1] = ((type_id & 0x1c) >> 2) | (((self.app_index & 0x3f) as u8) << 2);
        out[2] = (self.app_index >> 6) as u8;
        out[3] = (self.app_index >> 14) as u8;

        // Each foreign key byte straddles two memo bytes: its low 6 bits
        // fill the top of one, its high 2 bits the bottom of the next.
        for (i, &byte) in self.foreign_key.iter().enumerate() {
            out[i + 3] |= (byte & 0x3f) << 2;
            if let Some(next) = out.get_mut(i + 4) {
                *next |= byte >> 6;
            }
        }

        out
    }

    pub fn decode(data: &[u8]) -> Result<Self, KinError> {
        let bytes: &[u8; MEMO_LENGTH] = data
            .try_into()
            .map_err(|_| KinError::InvalidMemoLength(data.len()))?;

        let header = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let magic_byte = (header & 0x3) as u8;
        let version = ((header >> 2) & 0x7) as u8;
        let type_id = ((header >> 5) & 0x1f) as u8;
        let app_index = ((header >> 10) & 0xffff) as u16;

        let mut foreign_key = [0u8; FOREIGN_KEY_LENGTH];
        for (i, byte) in foreign_key.iter_mut().enumerate() {
            *byte = bytes[i + 3] >> 2;
            if let Some(next) = bytes.get(i + 4) {
                *byte |= (next & 0x03) << 6;
            }
        }

        Self::new(
            magic_byte,
            version,
            TransferType::try_from(type_id)?,
            app_index,
            &foreign_key,
        )
    }

    /// The base64 text carried in a memo instruction.
    pub fn to_base64(&self) -> String {
        BASE64_STANDARD.encode(self.encode())
    }
}

/// A memo as found on (or destined for) the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KinMemo {
    Text(String),
    Binary(KinBinaryMemo),
}

impl KinMemo {
    pub fn is_empty(&self) -> bool {
        matches!(self, KinMemo::Text(text) if text.is_empty())
    }

    /// The memo-program instruction that carries this memo.
    pub fn to_instruction(&self) -> Instruction {
        match self {
            KinMemo::Text(text) => memo::memo(text.as_bytes()),
            KinMemo::Binary(binary) => memo::memo(binary.to_base64()),
        }
    }

    /// Interpret memo instruction data: base64 text of a valid binary memo,
    /// otherwise plain text.
    pub fn from_memo_data(data: &[u8]) -> Self {
        BASE64_STANDARD
            .decode(data)
            .ok()
            .and_then(|decoded| KinBinaryMemo::decode(&decoded).ok())
            .map(KinMemo::Binary)
            .unwrap_or_else(|| KinMemo::Text(String::from_utf8_lossy(data).into_owned()))
    }
}

impl From<KinBinaryMemo> for KinMemo {
    fn from(memo: KinBinaryMemo) -> Self {
        KinMemo::Binary(memo)
    }
}

impl From<&str> for KinMemo {
    fn from(text: &str) -> Self {
        KinMemo::Text(text.to_owned())
    }
}
