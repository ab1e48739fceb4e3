#![no_main]
use libfuzzer_sys::fuzz_target;

use chrono::{DateTime, Utc};
use upload_files::{template, RawFile, UploadConfig, UploadSet};

fuzz_target!(|data: &[u8]| {
    let Some((head, rest)) = data.split_first_chunk::<8>() else {
        return;
    };
    let secs = i64::from_le_bytes(*head) % 253_402_300_800;
    let Some(now) = DateTime::<Utc>::from_timestamp(secs.abs(), 0) else {
        return;
    };

    let text = String::from_utf8_lossy(rest);
    let (tmpl, filename) = text.split_once('\n').unwrap_or((&*text, "file.bin"));

    let out = template::expand(tmpl, &now, filename, rest.len() as u64);
    assert_eq!(out, template::expand(tmpl, &now, filename, rest.len() as u64));
    if !tmpl.contains('%') {
        assert_eq!(out, tmpl);
    }

    let config = UploadConfig::default()
        .max_size(64)
        .max_file_size(16)
        .max_files(2)
        .unique(true);
    let set = UploadSet::new(
        vec![
            ("a".to_string(), vec![RawFile::from_bytes(filename.to_string(), rest.to_vec())]),
            ("b".to_string(), vec![RawFile::from_bytes(tmpl.to_string(), head.to_vec())]),
        ],
        &config,
    );
    let _ = set.check_aggregate(&config);
    let _ = set.check_per_file(&config);
});
