// Reporter test module
#[cfg(test)]
mod reporter_tests;
