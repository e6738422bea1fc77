//! Arbitrary-bin gray quantization regression test
//!
//! Tests quantization into bins with caller-given boundaries: bin tables,
//! center and average colormaps, automatic output depth, and forcing the
//! extreme colormap entries to black and white.
//!
//! # See also
//!
//! C Leptonica: `reference/leptonica/prog/threshnorm_reg.c`,
//! `pixThresholdGrayArb()` in `grayquant.c`

use graydepth_core::{Numa, PixelDepth, RemoveColormapTarget};
use graydepth_quant::{
    QuantError, make_gray_quant_colormap_arb, make_gray_quant_table_arb, threshold_gray_arb,
};
use graydepth_test::{RegParams, synth};

#[test]
fn arbquant_reg() {
    let mut rp = RegParams::new("arbquant");

    let gradient = synth::gradient_8bpp(256, 8).expect("gradient");

    // --- Test 1: bin table and center colormap ---
    let edges = Numa::from_i32_slice(&[30, 90, 180]);
    let (tab, cmap) = make_gray_quant_table_arb(&edges, 2).expect("table arb");
    for (input, bin) in [(0, 0), (29, 0), (30, 1), (89, 1), (90, 2), (179, 2), (180, 3), (255, 3)] {
        rp.compare_values(bin as f64, tab[input] as f64, 0.0);
    }
    // centers: 30/2, 120/2, 270/2, 435/2
    for (i, center) in [15u8, 60, 135, 217].into_iter().enumerate() {
        rp.compare_values(center as f64, cmap.get_rgb(i).map_or(0, |c| c.0) as f64, 0.0);
    }

    // --- Test 2: average colormap on a gradient ---
    let cmap = make_gray_quant_colormap_arb(&gradient, &tab, 2).expect("cmap arb");
    // every gray is present once per row, so bin averages are exact
    for (i, avg) in [14u8, 59, 134, 217].into_iter().enumerate() {
        rp.compare_values(avg as f64, cmap.get_rgb(i).map_or(0, |c| c.0) as f64, 0.0);
    }

    // colormapped sources are averaged by rendered gray, not by index
    let indexed = threshold_gray_arb(&gradient, &edges, 8, true, false, false).expect("indexed");
    let recomputed = make_gray_quant_colormap_arb(&indexed, &tab, 2).expect("cmap from cmapped");
    for (i, avg) in [14u8, 59, 134, 217].into_iter().enumerate() {
        rp.compare_values(avg as f64, recomputed.get_rgb(i).map_or(0, |c| c.0) as f64, 0.0);
    }

    // --- Test 3: unsorted boundaries are sorted; depth chosen from count ---
    let shuffled = Numa::from_i32_slice(&[180, 30, 90]);
    let pixd = threshold_gray_arb(&gradient, &shuffled, 0, false, false, false).expect("arb");
    rp.compare_values(2.0, pixd.depth().bits() as f64, 0.0);
    rp.compare_values(3.0, pixd.get_pixel(200, 0).unwrap_or(9) as f64, 0.0);
    let sorted = threshold_gray_arb(&gradient, &edges, 0, false, false, false).expect("arb sorted");
    rp.compare_pix(&pixd, &sorted);
    rp.write_pix_and_check(&pixd).expect("write arb");

    // --- Test 4: output depth selection ---
    let edges_of = |n: i32| {
        Numa::from_i32_slice(&(1..=n).map(|i| i * 255 / (n + 1)).collect::<Vec<_>>())
    };
    for (n, outdepth, expected) in [
        (1, 0, PixelDepth::Bit2),
        (3, 0, PixelDepth::Bit2),
        (4, 0, PixelDepth::Bit4),
        (15, 0, PixelDepth::Bit4),
        (16, 0, PixelDepth::Bit8),
        (3, 8, PixelDepth::Bit8),
        (7, 2, PixelDepth::Bit8),
        (7, 4, PixelDepth::Bit4),
    ] {
        let pixd = threshold_gray_arb(&gradient, &edges_of(n), outdepth, false, false, false)
            .expect("arb depth");
        rp.compare_values(expected.bits() as f64, pixd.depth().bits() as f64, 0.0);
        rp.compare_values((n + 1) as f64, pixd.colormap().map_or(0, |c| c.len()) as f64, 0.0);
    }

    // --- Test 5: black and white forcing ---
    let pixd = threshold_gray_arb(&gradient, &edges, 4, true, true, true).expect("arb bw");
    let cmap = pixd.colormap().expect("colormap");
    rp.compare_values(0.0, cmap.get_rgb(0).map_or(1, |c| c.0) as f64, 0.0);
    rp.compare_values(255.0, cmap.get_rgb(3).map_or(0, |c| c.0) as f64, 0.0);
    // interior entries keep their averages
    rp.compare_values(59.0, cmap.get_rgb(1).map_or(0, |c| c.0) as f64, 0.0);

    // --- Test 6: rendering maps each gray to its bin representative ---
    let rendered = pixd
        .remove_colormap(RemoveColormapTarget::ToGrayscale)
        .expect("render");
    rp.compare_values(0.0, rendered.get_pixel(10, 0).unwrap_or(1) as f64, 0.0);
    rp.compare_values(134.0, rendered.get_pixel(100, 0).unwrap_or(0) as f64, 0.0);
    rp.compare_values(255.0, rendered.get_pixel(250, 0).unwrap_or(0) as f64, 0.0);

    // --- Test 7: no boundaries gives a single bin ---
    let pixd =
        threshold_gray_arb(&gradient, &Numa::new(), 0, false, false, false).expect("one bin");
    rp.compare_values(1.0, pixd.colormap().map_or(0, |c| c.len()) as f64, 0.0);
    rp.compare_values(0.0, pixd.get_pixel(255, 7).unwrap_or(9) as f64, 0.0);

    // --- Test 8: argument errors ---
    let cmapped = threshold_gray_arb(&gradient, &edges, 0, false, false, false).expect("cmapped");
    let too_many = Numa::from_i32_slice(&(0..256).collect::<Vec<_>>());
    let errors = [
        matches!(
            make_gray_quant_table_arb(&edges, 1),
            Err(QuantError::TooManyBins { bins: 4, capacity: 2 })
        ),
        make_gray_quant_table_arb(&edges, 3).is_err(),
        make_gray_quant_colormap_arb(&gradient, &tab, 64).is_err(),
        make_gray_quant_colormap_arb(&gradient, &tab, 0).is_err(),
        threshold_gray_arb(&gradient, &edges, 3, false, false, false).is_err(),
        threshold_gray_arb(&gradient, &too_many, 8, false, false, false).is_err(),
        threshold_gray_arb(&cmapped, &edges, 0, false, false, false).is_err(),
    ];
    for is_err in errors {
        rp.compare_values(1.0, if is_err { 1.0 } else { 0.0 }, 0.0);
    }

    assert!(rp.cleanup());
}
