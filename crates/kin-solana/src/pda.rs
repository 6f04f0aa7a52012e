//! Program-derived addresses.
//!
//! A program-derived address (PDA) is
//! `SHA-256(seed_0 || ... || seed_n || program_id || "ProgramDerivedAddress")`
//! restricted to digests that are NOT valid Ed25519 points, so no private
//! key can ever sign for it. [`find_program_address`] appends a one-byte
//! bump seed, searching from 255 down to 0 for the first off-curve digest.

use sha2::{Digest, Sha256};

use crate::error::SolanaError;
use crate::key::PublicKey;

/// Maximum number of seeds, the bump seed included.
pub const MAX_SEEDS: usize = 16;

/// Maximum length of a single seed in bytes.
pub const MAX_SEED_LEN: usize = 32;

const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Derive the address for exactly these seeds, with no bump search.
///
/// Fails with [`SolanaError::InvalidSeeds`] when the digest lands on the
/// curve.
pub fn create_program_address(
    seeds: &[&[u8]],
    program_id: &PublicKey,
) -> Result<PublicKey, SolanaError> {
    check_seeds(seeds, MAX_SEEDS)?;

    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update(program_id.as_bytes());
    hasher.update(PDA_MARKER);

    let address = PublicKey::new(hasher.finalize().into());
    if address.is_on_curve() {
        return Err(SolanaError::InvalidSeeds);
    }
    Ok(address)
}

/// Find the first bump seed, counting down from 255, that yields a valid
/// program address for `seeds` under `program_id`.
///
/// The [`MAX_SEEDS`] cap includes the appended bump seed, so callers may
/// pass at most 15 seeds here (16 to [`create_program_address`]).
pub fn find_program_address(
    program_id: &PublicKey,
    seeds: &[&[u8]],
) -> Result<(PublicKey, u8), SolanaError> {
    check_seeds(seeds, MAX_SEEDS - 1)?;

    for bump in (0u8..=255).rev() {
        let bump_seed = [bump];
        let mut with_bump: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 1);
        with_bump.extend_from_slice(seeds);
        with_bump.push(&bump_seed);

        match create_program_address(&with_bump, program_id) {
            Ok(address) => {
                tracing::trace!(%program_id, %address, bump, "found program address");
                return Ok((address, bump));
            }
            Err(SolanaError::InvalidSeeds) => continue,
            Err(other) => return Err(other),
        }
    }

    tracing::debug!(%program_id, seeds = seeds.len(), "no bump seed yields a program address");
    Err(SolanaError::NoValidBumpFound)
}

fn check_seeds(seeds: &[&[u8]], max_seeds: usize) -> Result<(), SolanaError> {
    if seeds.len() > max_seeds {
        return Err(SolanaError::MaxSeedsExceeded);
    }
    if seeds.iter().any(|seed| seed.len() > MAX_SEED_LEN) {
        return Err(SolanaError::MaxSeedLengthExceeded);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bpf_loader() -> PublicKey {
        PublicKey::from_base58("BPFLoader1111111111111111111111111111111111").unwrap()
    }

    // -- create_program_address --------------------------------------------

    #[test]
    fn create_known_vectors() {
        let program = bpf_loader();
        let public_key =
            PublicKey::from_base58("SeedPubey1111111111111111111111111111111111").unwrap();

        let cases: Vec<(Vec<&[u8]>, &str)> = vec![
            (
                vec![public_key.as_bytes()],
                "GUs5qLUfsEHkcMB9T38vjr18ypEhRuNWiePW2LoK4E3K",
            ),
            (
                vec![&b"Talking"[..], &b"Squirrels"[..]],
                "HwRVBufQ4haG5XSgpspwKtNd3PC9GM9m1196uJW36vds",
            ),
            (
                vec![&b""[..], &[1u8][..]],
                "3gF2KMe9KiC6FNVBmfg9i267aMPvK37FewCip4eGBFcT",
            ),
            (
                vec!["☉".as_bytes()],
                "7ytmC1nT1xY4RfxCV2ZgyA7UakC93do5ZdyhdF3EtPj7",
            ),
        ];

        for (seeds, expected) in cases {
            let address = create_program_address(&seeds, &program).unwrap();
            assert_eq!(address.to_base58(), expected);
        }
    }

    #[test]
    fn create_is_seed_sensitive() {
        let program = bpf_loader();
        let a = create_program_address(&[b"Talking"], &program).unwrap();
        let b = create_program_address(&[b"Talking", b"Squirrels"], &program).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn create_rejects_long_seed() {
        let long = [0u8; MAX_SEED_LEN + 1];
        assert_eq!(
            create_program_address(&[&long], &bpf_loader()),
            Err(SolanaError::MaxSeedLengthExceeded)
        );

        let exact = [0u8; MAX_SEED_LEN];
        assert_ne!(
            create_program_address(&[&exact], &bpf_loader()),
            Err(SolanaError::MaxSeedLengthExceeded)
        );
    }

    #[test]
    fn create_rejects_too_many_seeds() {
        let seeds: Vec<&[u8]> = vec![&b"x"[..]; MAX_SEEDS + 1];
        assert_eq!(
            create_program_address(&seeds, &bpf_loader()),
            Err(SolanaError::MaxSeedsExceeded)
        );
    }

    // -- find_program_address ----------------------------------------------

    #[test]
    fn find_known_vector() {
        let public_key =
            PublicKey::from_base58("SeedPubey1111111111111111111111111111111111").unwrap();
        let (address, bump) =
            find_program_address(&bpf_loader(), &[public_key.as_bytes()]).unwrap();
        assert_eq!(
            address.to_base58(),
            "3mwH2xYScibex6y1QMKemsND7n1X2T86KSUnSzXYi9tB"
        );
        assert_eq!(bump, 253);
    }

    #[test]
    fn find_matches_create_with_bump() {
        let program = bpf_loader();
        let (address, bump) = find_program_address(&program, &[b"Lil'", b"Bits"]).unwrap();
        assert_eq!(
            create_program_address(&[b"Lil'", b"Bits", &[bump]], &program).unwrap(),
            address
        );
        assert!(!address.is_on_curve());
    }

    #[test]
    fn find_is_deterministic() {
        let program = bpf_loader();
        assert_eq!(
            find_program_address(&program, &[b"seed"]).unwrap(),
            find_program_address(&program, &[b"seed"]).unwrap()
        );
    }

    #[test]
    fn find_reserves_a_slot_for_the_bump() {
        let seeds: Vec<&[u8]> = vec![&b"x"[..]; MAX_SEEDS];
        assert_eq!(
            find_program_address(&bpf_loader(), &seeds),
            Err(SolanaError::MaxSeedsExceeded)
        );

        let seeds: Vec<&[u8]> = vec![&b"x"[..]; MAX_SEEDS - 1];
        assert!(find_program_address(&bpf_loader(), &seeds).is_ok());
    }
}
