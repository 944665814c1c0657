// Template test module
#[cfg(test)]
mod template_tests;
#[cfg(test)]
mod upgrade_tests;
