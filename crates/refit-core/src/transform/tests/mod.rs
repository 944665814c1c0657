#[cfg(test)]
mod adapters_tests;
