//! Base58 codec using the Bitcoin alphabet.
//!
//! Leading zero bytes map one-to-one onto leading `'1'` characters, so
//! `decode(&encode(b)) == b` holds for every byte sequence, including the
//! empty one.

use crate::error::{Error, Result};
use crate::hash::checksum;

/// The Bitcoin base58 alphabet (no `0`, `O`, `I` or `l`).
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

const INVALID: u8 = 0xff;

const DIGITS: [u8; 128] = {
    let mut map = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        map[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    map
};

#[inline]
fn digit(ch: char) -> Option<u8> {
    let code = ch as usize;
    if code < DIGITS.len() && DIGITS[code] != INVALID {
        Some(DIGITS[code])
    } else {
        None
    }
}

/// Whether `ch` belongs to the base58 alphabet.
#[inline]
pub fn is_base58_char(ch: char) -> bool {
    digit(ch).is_some()
}

/// Encode bytes as base58 text.
pub fn encode(bytes: &[u8]) -> String {
    let zeros = bytes.iter().take_while(|&&b| b == 0).count();

    // Little-endian base58 digits of the big-endian integer in `bytes`.
    let mut digits: Vec<u8> = Vec::with_capacity(bytes.len() * 138 / 100 + 1);
    for &byte in &bytes[zeros..] {
        let mut carry = u32::from(byte);
        for d in &mut digits {
            carry += u32::from(*d) << 8;
            *d = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut out = String::with_capacity(zeros + digits.len());
    out.extend(core::iter::repeat_n('1', zeros));
    out.extend(
        digits
            .iter()
            .rev()
            .map(|&d| char::from(ALPHABET[usize::from(d)])),
    );
    out
}

/// Decode base58 text into bytes.
///
/// Fails on the first character outside [`ALPHABET`]. Whitespace is not
/// stripped.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let mut zeros = 0;
    let mut leading = true;
    // Little-endian base-256 accumulator.
    let mut bytes: Vec<u8> = Vec::with_capacity(text.len());

    for (index, character) in text.char_indices() {
        let value = digit(character).ok_or(Error::InvalidCharacter { character, index })?;

        if leading && value == 0 {
            zeros += 1;
            continue;
        }
        leading = false;

        let mut carry = u32::from(value);
        for b in &mut bytes {
            carry += u32::from(*b) * 58;
            *b = (carry & 0xff) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push((carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    let mut out = vec![0u8; zeros];
    out.extend(bytes.iter().rev());
    Ok(out)
}

/// Encode `payload` followed by its 4-byte double-SHA-256 checksum.
pub fn check_encode(payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + 4);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum(payload));
    encode(&data)
}

/// Decode Base58Check text, verify and strip the trailing checksum.
pub fn check_decode(text: &str) -> Result<Vec<u8>> {
    let mut data = decode(text)?;
    if data.len() < 4 {
        return Err(Error::MalformedExtendedKey { len: data.len() });
    }

    let split = data.len() - 4;
    if data[split..] != checksum(&data[..split]) {
        return Err(Error::InvalidChecksum);
    }

    data.truncate(split);
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // Vectors from Bitcoin Core's base58_encode_decode.json
    const VECTORS: &[(&[u8], &str)] = &[
        (&[], ""),
        (&hex!("61"), "2g"),
        (&hex!("626262"), "a3gV"),
        (&hex!("636363"), "aPEr"),
        (
            &hex!("73696d706c792061206c6f6e6720737472696e67"),
            "2cFupjhnEsSn59qHXstmK2ffpLv2",
        ),
        (
            &hex!("00eb15231dfceb60925886b67d065299925915aeb172c06647"),
            "1NS17iag9jJgTHD1VXjvLCEnZuQ3rJDE9L",
        ),
        (&hex!("516b6fcd0f"), "ABnLTmg"),
        (&hex!("bf4f89001e670274dd"), "3SEo3LWLoPntC"),
        (&hex!("572e4794"), "3EFU7m"),
        (&hex!("ecac89cad93923c02321"), "EJDM8drfXA6uyA"),
        (&hex!("10c8511e"), "Rt5zm"),
        (&hex!("00000000000000000000"), "1111111111"),
    ];

    mod encode_tests {
        use super::*;

        #[test]
        fn test_known_vectors() {
            for (bytes, text) in VECTORS {
                assert_eq!(encode(bytes), *text, "encoding {}", hex::encode(bytes));
            }
        }

        #[test]
        fn test_leading_zeros_preserved() {
            let encoded = encode(&[0, 0, 1, 2]);
            assert!(encoded.starts_with("11"));
            assert!(!encoded.starts_with("111"));
            assert_eq!(encoded, "115T");
        }

        #[test]
        fn test_single_zero_byte() {
            assert_eq!(encode(&[0]), "1");
        }

        #[test]
        fn test_matches_bs58() {
            let samples: &[&[u8]] = &[
                &hex!("0488b21e000000000000000000"),
                &hex!("ff"),
                &hex!("0000ffff0000"),
                &[0xab; 82],
            ];
            for sample in samples {
                assert_eq!(encode(sample), bs58::encode(sample).into_string());
            }
        }
    }

    mod decode_tests {
        use super::*;

        #[test]
        fn test_known_vectors() {
            for (bytes, text) in VECTORS {
                assert_eq!(decode(text).unwrap(), bytes.to_vec(), "decoding {text}");
            }
        }

        #[test]
        fn test_invalid_characters() {
            for (text, bad, at) in [("0abc", '0', 0), ("abOc", 'O', 2), ("1I", 'I', 1), ("zl", 'l', 1)] {
                assert_eq!(
                    decode(text),
                    Err(Error::InvalidCharacter {
                        character: bad,
                        index: at
                    })
                );
            }
        }

        #[test]
        fn test_rejects_whitespace_and_non_ascii() {
            assert!(decode(" 2g").is_err());
            assert!(decode("2g\n").is_err());
            assert!(matches!(
                decode("2gé"),
                Err(Error::InvalidCharacter { character: 'é', index: 2 })
            ));
        }

        #[test]
        fn test_roundtrip_through_text() {
            for text in ["1", "11", "1112", "3EFU7m", "zzzzzzzzzz"] {
                assert_eq!(encode(&decode(text).unwrap()), text);
            }
        }

        #[test]
        fn test_matches_bs58() {
            let text = "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8";
            assert_eq!(decode(text).unwrap(), bs58::decode(text).into_vec().unwrap());
        }
    }

    mod check_tests {
        use super::*;

        #[test]
        fn test_p2pkh_address() {
            let payload = hex!("0062e907b15cbf27d5425399ebf6f0fb50ebb88f18");
            let encoded = check_encode(&payload);
            assert_eq!(encoded, "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa");
            assert_eq!(check_decode(&encoded).unwrap(), payload.to_vec());
        }

        #[test]
        fn test_bad_checksum() {
            assert_eq!(
                check_decode("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNb"),
                Err(Error::InvalidChecksum)
            );
        }

        #[test]
        fn test_too_short() {
            assert_eq!(check_decode("2g"), Err(Error::MalformedExtendedKey { len: 1 }));
        }
    }
}
