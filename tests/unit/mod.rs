mod basic_tests;
mod codec_tests;
