use super::fixtures::Bench;
use crate::radio::RadioState;
use crate::Error;

#[test]
fn missing_reset_line_is_invalid_configuration() {
    let bench = Bench::new();
    let mut radio = bench.radio_with(bench.transport_without_reset());

    assert_eq!(radio.is_ready(), Ok(false));
    assert_eq!(radio.state(), RadioState::InvalidConfiguration);
    assert_eq!(radio.firmware_version(), Ok(None));

    // neutral results without touching the chip
    assert_eq!(radio.send_buffer(b"ping"), Ok(()));
    assert_eq!(radio.try_receive(0), Ok(0));
    assert_eq!(radio.spreading_factor(), Ok(None));
    assert_eq!(radio.signal_strength_dbm(), Ok(None));
    assert!(radio.dump_registers().unwrap().is_empty());

    assert_eq!(bench.chip.borrow().transactions, 0);
    assert!(bench.pins.borrow().is_empty());
    assert_eq!(bench.elapsed_ms(), 0);
}

#[test]
fn missing_boot_line_is_invalid_configuration() {
    let bench = Bench::new();
    let mut radio = bench.radio_with(bench.transport_without_boot());

    assert_eq!(radio.is_ready(), Ok(false));
    assert_eq!(radio.state(), RadioState::InvalidConfiguration);
    assert_eq!(radio.send_text("ping"), Ok(()));
    assert_eq!(radio.read_buffer(&mut [0u8; 4]), Ok(0));

    assert_eq!(bench.chip.borrow().transactions, 0);
    assert!(bench.pins.borrow().is_empty());
}

#[test]
fn initialization_resets_and_programs_baseline() {
    let bench = Bench::new();
    let mut radio = bench.radio();
    assert_eq!(radio.state(), RadioState::Uninitialized);

    assert_eq!(radio.is_ready(), Ok(true));
    assert_eq!(radio.state(), RadioState::Ready);
    assert_eq!(radio.firmware_version(), Ok(Some(0x12)));

    assert_eq!(
        *bench.pins.borrow(),
        [("boot", false), ("reset", true), ("reset", false), ("reset", true)]
    );
    assert_eq!(bench.elapsed_ms(), 450);

    let chip = bench.chip.borrow();
    // LoRa sleep first, standby last
    let modes = chip.writes_to(0x01);
    assert_eq!(modes.first(), Some(&0x80));
    assert_eq!(modes.last(), Some(&0x81));

    assert_eq!([chip.reg(0x06), chip.reg(0x07), chip.reg(0x08)], [0xE4, 0xC0, 0x00]);
    assert_eq!(chip.reg(0x0E), 0x00);
    assert_eq!(chip.reg(0x0F), 0x00);
    assert_eq!(chip.reg(0x0C), 0x23);
    assert_eq!(chip.reg(0x26), 0x04);
    assert_eq!(chip.reg(0x09), 0x8F);
}

#[test]
fn lna_boost_keeps_other_bits() {
    let bench = Bench::new();
    bench.chip.borrow_mut().registers[0x0C] = 0x24;
    let mut radio = bench.radio();

    assert_eq!(radio.is_ready(), Ok(true));
    assert_eq!(bench.chip.borrow().reg(0x0C), 0x27);
}

#[test]
fn initialization_runs_once() {
    let bench = Bench::new();
    let mut radio = bench.radio();

    assert_eq!(radio.is_ready(), Ok(true));
    assert_eq!(radio.is_ready(), Ok(true));
    radio.idle().unwrap();

    assert_eq!(bench.pins.borrow().len(), 4);
    assert_eq!(bench.elapsed_ms(), 450);
}

#[test]
fn firmware_mismatch_is_sticky_until_new_transport() {
    let bench = Bench::new();
    bench.chip.borrow_mut().registers[0x42] = 0x11;
    let mut radio = bench.radio();

    assert_eq!(radio.is_ready(), Ok(false));
    assert_eq!(radio.state(), RadioState::FirmwareMismatch);
    assert_eq!(radio.firmware_version(), Ok(Some(0x11)));

    // no second reset attempt
    assert_eq!(radio.is_ready(), Ok(false));
    assert_eq!(bench.pins.borrow().len(), 4);
    // nothing beyond the version read
    assert!(bench.chip.borrow().writes.is_empty());

    bench.chip.borrow_mut().registers[0x42] = 0x12;
    let _previous = radio.supply_transport(bench.transport());
    assert_eq!(radio.state(), RadioState::Uninitialized);
    assert_eq!(radio.is_ready(), Ok(true));
    assert_eq!(radio.firmware_version(), Ok(Some(0x12)));
}

#[test]
fn supplying_transport_restores_default_configuration() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();
    radio.set_spreading_factor(10).unwrap();
    assert_eq!(radio.configuration().spreading_factor, 10);

    let _previous = radio.supply_transport(bench.transport());
    assert_eq!(radio.configuration().spreading_factor, 7);
    assert_eq!(radio.available(), 0);
}

#[test]
fn bus_failure_during_initialization_allows_retry() {
    let bench = Bench::new();
    let mut radio = bench.radio();

    bench.chip.borrow_mut().fail_bus = true;
    assert_eq!(radio.is_ready(), Err(Error::Bus));
    assert_eq!(radio.state(), RadioState::Uninitialized);

    bench.chip.borrow_mut().fail_bus = false;
    assert_eq!(radio.is_ready(), Ok(true));
}

#[test]
fn idle_and_sleep_select_modes() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();

    radio.sleep().unwrap();
    assert_eq!(bench.chip.borrow().reg(0x01), 0x80);

    radio.idle().unwrap();
    assert_eq!(bench.chip.borrow().reg(0x01), 0x81);
}

#[test]
fn release_returns_transport() {
    let bench = Bench::new();
    let radio = bench.radio();
    let (transport, _delay) = radio.release();
    assert!(transport.boot.is_some());
    assert!(transport.reset.is_some());
}
