#![no_main]

use libfuzzer_sys::fuzz_target;
use quicklook::site::html::{GridRegion, PatchOutcome, find_grid_region, patch_document};
use quicklook::site::thumbnail::ThumbnailResolver;
use quicklook_core::manifest::Manifest;

fuzz_target!(|data: &[u8]| {
    let Ok(html) = std::str::from_utf8(data) else {
        return;
    };

    if let GridRegion::Found(range) = find_grid_region(html) {
        assert!(range.end <= html.len());
        assert!(html.is_char_boundary(range.start) && html.is_char_boundary(range.end));
    }

    let manifest: Manifest = [("001_fuzz".to_string(), vec!["a.png".to_string()])]
        .into_iter()
        .collect();
    let resolver = ThumbnailResolver::from_names(vec!["001_fuzz.png".to_string()]);

    if let PatchOutcome::Patched { html: once, .. } =
        patch_document(html, &manifest, &resolver, "/t/")
    {
        let _ = patch_document(&once, &manifest, &resolver, "/t/");
    }
});
