//! Module docs containing `svgbob` diagrams go through `svgbob_doc!`. With the `doc`
//! feature the diagrams are rendered to SVG; without it the text is passed through
//! unchanged, so the diagrams still read fine as ASCII art.

#[cfg(feature = "doc")]
macro_rules! svgbob_doc {
    ($($t:tt)*) => (
        svgbobdoc::transform!($($t)*)
    )
}

#[cfg(not(feature = "doc"))]
macro_rules! svgbob_doc {
    ($( #![doc = $d:literal] )*) => (
        core::concat!($( $d, '\n' ),*)
    );
}

pub(crate) use svgbob_doc;
