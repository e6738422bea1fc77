//! Gray quantization regression test
//!
//! Tests the index and target lookup tables, uniform thresholding to
//! 2, 4 and 8 bpp with and without colormaps, and quantization onto an
//! existing colormap.
//!
//! # See also
//!
//! C Leptonica: `reference/leptonica/prog/grayquant_reg.c`

use graydepth_core::{PixColormap, PixelDepth, RemoveColormapTarget};
use graydepth_quant::{
    gray_quant_from_cmap, make_gray_quant_index_table, make_gray_quant_target_table,
    threshold_on_8bpp, threshold_to_2bpp, threshold_to_4bpp,
};
use graydepth_test::{RegParams, synth};

#[test]
fn grayquant_reg() {
    let mut rp = RegParams::new("grayquant");

    // --- Test 1: index tables are monotone and span all levels ---
    for nlevels in [2u32, 3, 5, 16, 64, 256] {
        let tab = make_gray_quant_index_table(nlevels).expect("index table");
        let monotone = tab.as_slice().windows(2).all(|w| w[0] <= w[1]);
        rp.compare_values(1.0, if monotone { 1.0 } else { 0.0 }, 0.0);
        rp.compare_values(0.0, tab[0] as f64, 0.0);
        rp.compare_values((nlevels - 1) as f64, tab[255] as f64, 0.0);
    }

    // --- Test 2: target table for 4 levels at 8 bpp ---
    let tab = make_gray_quant_target_table(4, 8).expect("target table");
    // thresholds at 42, 127, 212; targets 0, 85, 170, 255
    for (input, expected) in [(0, 0), (42, 0), (43, 85), (127, 85), (128, 170), (213, 255)] {
        rp.compare_values(expected as f64, tab[input] as f64, 0.0);
    }
    let tab = make_gray_quant_target_table(16, 4).expect("target table 4bpp");
    rp.compare_values(15.0, tab[255] as f64, 0.0);
    rp.compare_values(0.0, tab[8] as f64, 0.0);
    rp.compare_values(1.0, tab[9] as f64, 0.0);

    let gradient = synth::gradient_8bpp(256, 4).expect("gradient");

    // --- Test 3: threshold to 2 bpp without colormap uses all four values ---
    let pixd = threshold_to_2bpp(&gradient, 4, false).expect("2bpp");
    rp.compare_values(2.0, pixd.depth().bits() as f64, 0.0);
    rp.compare_values(0.0, if pixd.has_colormap() { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(0.0, pixd.get_pixel(0, 0).unwrap_or(9) as f64, 0.0);
    rp.compare_values(3.0, pixd.get_pixel(255, 0).unwrap_or(9) as f64, 0.0);
    rp.write_pix_and_check(&pixd).expect("write 2bpp");

    // --- Test 4: threshold to 2 bpp with a 3-level colormap ---
    let pixd = threshold_to_2bpp(&gradient, 3, true).expect("2bpp cmap");
    let cmap = pixd.colormap().expect("colormap");
    rp.compare_values(3.0, cmap.len() as f64, 0.0);
    rp.compare_values(127.0, cmap.get_rgb(1).map_or(0, |c| c.0) as f64, 0.0);
    rp.compare_values(2.0, pixd.get_pixel(255, 3).unwrap_or(9) as f64, 0.0);
    // indices never exceed nlevels - 1
    let max_index = (0..256).filter_map(|x| pixd.get_pixel(x, 0)).max().unwrap_or(0);
    rp.compare_values(2.0, max_index as f64, 0.0);

    // --- Test 5: rendering through the colormap approximates the source ---
    let pixd = threshold_to_4bpp(&gradient, 16, true).expect("4bpp cmap");
    let rendered = pixd
        .remove_colormap(RemoveColormapTarget::ToGrayscale)
        .expect("render");
    let mut max_err = 0i32;
    for x in 0..256 {
        let src = gradient.get_pixel(x, 0).unwrap_or(0) as i32;
        let dst = rendered.get_pixel(x, 0).unwrap_or(0) as i32;
        max_err = max_err.max((src - dst).abs());
    }
    // bins are 17 wide, so every gray is within half a bin of its level
    rp.compare_values(0.0, max_err as f64, 9.0);

    // --- Test 6: 8 bpp requantization keeps depth and snaps values ---
    let pixd = threshold_on_8bpp(&gradient, 3, false).expect("8bpp");
    rp.compare_values(8.0, pixd.depth().bits() as f64, 0.0);
    for x in [0u32, 100, 200] {
        let v = pixd.get_pixel(x, 0).unwrap_or(1);
        let on_level = matches!(v, 0 | 127 | 255);
        rp.compare_values(1.0, if on_level { 1.0 } else { 0.0 }, 0.0);
    }
    let pixd = threshold_on_8bpp(&gradient, 256, true).expect("8bpp identity");
    let rendered = pixd
        .remove_colormap(RemoveColormapTarget::ToGrayscale)
        .expect("render");
    rp.compare_pix(&gradient, &rendered);

    // --- Test 7: nearest gray from a given colormap ---
    let mut cmap = PixColormap::new(8).expect("cmap");
    for v in [20u8, 90, 200] {
        cmap.add_rgb(v, v, v).expect("add");
    }
    let pix = synth::from_values_8bpp(5, 1, &[0, 55, 56, 145, 255]).expect("pix");
    let pixd = gray_quant_from_cmap(&pix, &cmap, 2).expect("from cmap");
    rp.compare_values(2.0, pixd.depth().bits() as f64, 0.0);
    for (x, expected) in [0u32, 0, 1, 1, 2].into_iter().enumerate() {
        rp.compare_values(expected as f64, pixd.get_pixel(x as u32, 0).unwrap_or(9) as f64, 0.0);
    }
    let pixd = gray_quant_from_cmap(&pix, &cmap, 8).expect("from cmap 8");
    rp.compare_values(8.0, pixd.depth().bits() as f64, 0.0);
    rp.compare_values(3.0, pixd.colormap().map_or(0, |c| c.len()) as f64, 0.0);

    // --- Test 8: a colormapped source is returned unchanged ---
    let cmapped = threshold_to_4bpp(&gradient, 5, true).expect("cmapped");
    let copy = gray_quant_from_cmap(&cmapped, &cmap, 2).expect("copy");
    rp.compare_pix(&cmapped, &copy);

    // --- Test 9: argument errors ---
    let pix4 = graydepth_core::Pix::new(4, 4, PixelDepth::Bit4).expect("4bpp");
    let errors = [
        make_gray_quant_index_table(1).is_err(),
        make_gray_quant_target_table(17, 4).is_err(),
        make_gray_quant_target_table(4, 1).is_err(),
        threshold_to_2bpp(&gradient, 5, true).is_err(),
        threshold_to_4bpp(&pix4, 4, false).is_err(),
        threshold_on_8bpp(&gradient, 1, false).is_err(),
        gray_quant_from_cmap(&pix, &cmap, 3).is_err(),
        gray_quant_from_cmap(&pix, &PixColormap::new(8).expect("empty"), 8).is_err(),
    ];
    for is_err in errors {
        rp.compare_values(1.0, if is_err { 1.0 } else { 0.0 }, 0.0);
    }

    assert!(rp.cleanup());
}
