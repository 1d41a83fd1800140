use sha2::{Digest, Sha256};

use crate::types::SnapshotEntry;

/// Outcome of a cumulative-weight draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    /// Index of the winning row in the snapshot.
    pub index: usize,
    /// `random % total`, the ticket that landed in the winner's range.
    pub ticket: u128,
    /// Total number of tickets the draw was taken over.
    pub total: u128,
    /// True when every weight was zero and each entry counted as one ticket.
    pub uniform: bool,
}

/// Interpret a randomness buffer as an unsigned integer.
///
/// Takes the first 16 bytes big-endian. Shorter buffers are left-padded with zeros.
pub fn randomness_to_u128(randomness: &[u8]) -> u128 {
    let take = randomness.len().min(16);
    let mut buf = [0u8; 16];
    buf[16 - take..].copy_from_slice(&randomness[..take]);
    u128::from_be_bytes(buf)
}

/// Sum of all weights in the snapshot.
pub fn total_weight(entries: &[SnapshotEntry]) -> u128 {
    entries.iter().map(|e| u128::from(e.weight)).sum()
}

/// Pick a winner by cumulative-weight selection.
///
/// Entries are expected in entry-id order. Each entry owns the ticket range
/// `[prefix_before, prefix_before + weight)`; the winner is the first entry whose
/// running sum exceeds `random % total`. When every weight is zero each entry counts
/// as weight 1, so a non-empty snapshot always yields a winner.
///
/// Returns `None` only for an empty snapshot. The result depends only on the snapshot
/// and `random`.
pub fn select_winner(entries: &[SnapshotEntry], random: u128) -> Option<Selection> {
    if entries.is_empty() {
        return None;
    }

    let weighted_total = total_weight(entries);
    let uniform = weighted_total == 0;
    let total = if uniform {
        entries.len() as u128
    } else {
        weighted_total
    };
    let ticket = random % total;

    let mut cumulative: u128 = 0;
    for (index, entry) in entries.iter().enumerate() {
        cumulative += if uniform { 1 } else { u128::from(entry.weight) };
        if cumulative > ticket {
            return Some(Selection {
                index,
                ticket,
                total,
                uniform,
            });
        }
    }

    None
}

/// Fingerprint of a snapshot, stored with the round so a draw can be re-checked later.
///
/// `sha256( 0x02 || for each row: entry_id_u64_be || owner_len_u32_be || owner_bytes || weight_u64_be )`
pub fn snapshot_digest(entries: &[SnapshotEntry]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update([0x02]);
    for entry in entries {
        let owner = entry.owner.as_str().as_bytes();
        hasher.update(entry.entry_id.to_be_bytes());
        hasher.update((owner.len() as u32).to_be_bytes());
        hasher.update(owner);
        hasher.update(entry.weight.to_be_bytes());
    }
    hasher.finalize().into()
}

/// Hex form of [`snapshot_digest`], as recorded on the round.
pub fn snapshot_digest_hex(entries: &[SnapshotEntry]) -> String {
    hex::encode(snapshot_digest(entries))
}
