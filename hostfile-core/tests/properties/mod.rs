mod classification_tests;
mod pipeline_tests;
