//! Whole-pipeline tests: SubC source text through the frontend and
//! down to assembly text.
