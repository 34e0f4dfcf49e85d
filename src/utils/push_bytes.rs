use bitcoin::script::PushBytesBuf;

use crate::OrdResult;

/// Converts a byte slice into a [`PushBytesBuf`] suitable for a script push.
pub fn bytes_to_push_bytes(bytes: &[u8]) -> OrdResult<PushBytesBuf> {
    let mut push_bytes = PushBytesBuf::with_capacity(bytes.len());
    push_bytes.extend_from_slice(bytes)?;

    Ok(push_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_convert_bytes_to_push_bytes() {
        let bytes = b"reinscription.bitmap";
        let push_bytes = bytes_to_push_bytes(bytes).unwrap();

        assert_eq!(push_bytes.as_bytes(), bytes);
    }
}
