fn main() {
    // ESP-IDF link arguments and sysenv are only needed for the firmware
    // target; host builds (tests, simulation) skip embuild entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
