//! PCM payload extraction and hashing.

fn read_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let chunk = bytes.get(at..at + 4)?;
    Some(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
}

/// Returns the payload of the `data` chunk, or `None` if the bytes are not a
/// well-formed RIFF/WAVE file.
///
/// Chunks before `data` are skipped, honouring RIFF word alignment.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.get(0..4)? != b"RIFF" || wav_data.get(8..12)? != b"WAVE" {
        return None;
    }

    let mut pos = 12;
    while pos + 8 <= wav_data.len() {
        let id = &wav_data[pos..pos + 4];
        let size = read_u32(wav_data, pos + 4)? as usize;
        let start = pos + 8;

        if id == b"data" {
            return wav_data.get(start..start.checked_add(size)?);
        }
        pos = start + size + (size & 1);
    }

    None
}

/// BLAKE3 hash of the PCM payload of a WAV file.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}
