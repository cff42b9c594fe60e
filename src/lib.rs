//! A driver for the TI INA219 current and power monitor
//!
//! This driver was built using [`embedded-hal`] traits. The blocking driver [`INA219`] is
//! available with the `sync` feature, its async twin `AsyncINA219` with the `async` feature.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/1
//!
//! On creation the driver checks that the configuration register holds the INA219 power-on
//! default, resets the chip and programs it for continuous shunt and bus conversion on the
//! 32V / 320mV ranges with 12 bit resolution. Current is derived on the host from the shunt
//! voltage and the configured shunt resistance (0.1 Ohm unless changed); the chip's own
//! calibration and current registers are left alone.
//!
//! The driver takes the bus by value. Hand it `&mut i2c` to keep the bus: a failed
//! [`INA219::new`] drops whatever it was given, and [`INA219::release`] returns it on success.
//! Use [`INA219::detect`] to probe an address without giving up the bus at all.
//!
//! # Examples
//!
//! ```rust,no_run
//! use embedded_hal_mock::eh1::{delay::NoopDelay, i2c::Mock};
//! use ina219_monitor::INA219;
//!
//! let mut i2c = Mock::new(&[]);
//! let mut delay = NoopDelay;
//! let mut ina219 = INA219::new(&mut i2c, &mut delay).unwrap();
//!
//! ina219.set_shunt_resistance(0.05);
//! let volts = ina219.bus_voltage().unwrap();
//! let amps = ina219.current().unwrap();
//! ```

#![no_std]
pub(crate) mod fmt;

#[cfg(not(any(feature = "sync", feature = "async")))]
compile_error!("You should probably choose at least one of `sync` and `async` features.");

#[allow(unused_imports)]
use embedded_hal::i2c::Error as _;

#[cfg(feature = "sync")]
use embedded_hal::delay::DelayNs;
#[cfg(feature = "sync")]
use embedded_hal::i2c::ErrorType;
#[cfg(feature = "sync")]
use embedded_hal::i2c::I2c;
#[cfg(feature = "async")]
use embedded_hal_async::delay::DelayNs as AsyncDelayNs;
#[cfg(feature = "async")]
use embedded_hal_async::i2c::ErrorType as AsyncErrorType;
#[cfg(feature = "async")]
use embedded_hal_async::i2c::I2c as AsyncI2c;

/// Default I2C address with A0 and A1 tied to GND
pub const DEFAULT_ADDRESS: u8 = 0x40;

/// Shunt resistance assumed after a reset, in Ohms
pub const DEFAULT_SHUNT_OHMS: f32 = 0.1;

/// Configuration register content after power-on, used to recognise the chip
const POWER_ON_CONFIG: u16 = 0x399F;

/// Writing this to the configuration register resets all registers
const RESET: u16 = 0b1000_0000_0000_0000;

/// Time the chip needs after a configuration register write
const SETTLE_TIME_US: u32 = 2000;

// 4mV per LSB
const BUS_VOLTAGE_LSB: f32 = 0.004;
const SHUNT_COUNTS_PER_VOLT: f32 = 1_000_000.0;

// Status bits in the low end of the bus voltage register
const CNVR: u16 = 0b0000_0000_0000_0010;
const OVF: u16 = 0b0000_0000_0000_0001;

#[allow(dead_code)]
#[allow(non_camel_case_types)]
#[derive(Copy, Clone)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Register {
    // Configuration Register
    CONFIG = 0x00,
    // Voltage across the shunt resistor
    SHUNT_VOLTAGE = 0x01,
    // Bus voltage measurement data plus conversion ready and overflow flags
    BUS_VOLTAGE = 0x02,
    // Calculated power, only valid with the calibration register programmed
    POWER = 0x03,
    // Calculated current, only valid with the calibration register programmed
    CURRENT = 0x04,
    // Full scale range of the current and power registers
    CALIBRATION = 0x05,
    MANUFACTURER_ID = 0xFE,
    DIE_ID = 0xFF,
}

impl Register {
    #[inline(always)]
    pub fn addr(self) -> u8 {
        self as u8
    }
}

impl From<Register> for u8 {
    fn from(r: Register) -> u8 {
        r as u8
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
/// Bus Voltage Range
pub enum BusVoltageRange {
    // 16V full scale range
    FSR16V = 0b0000_0000_0000_0000,
    // 32V full scale range (default)
    FSR32V = 0b0010_0000_0000_0000,
}

impl BusVoltageRange {
    #[inline(always)]
    pub fn bits(self) -> u16 {
        self as u16
    }

    fn from_bits(bits: u16) -> Self {
        if bits & Self::FSR32V.bits() != 0 {
            Self::FSR32V
        } else {
            Self::FSR16V
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
/// Shunt Voltage Gain
/// Sets the PGA gain and with it the full scale range of the shunt voltage measurement
pub enum ShuntGain {
    // Gain 1, ±40mV range
    DIV1 = 0b0000_0000_0000_0000,
    // Gain /2, ±80mV range
    DIV2 = 0b0000_1000_0000_0000,
    // Gain /4, ±160mV range
    DIV4 = 0b0001_0000_0000_0000,
    // Gain /8, ±320mV range (default)
    DIV8 = 0b0001_1000_0000_0000,
}

impl ShuntGain {
    #[inline(always)]
    pub fn bits(self) -> u16 {
        self as u16
    }

    fn from_bits(bits: u16) -> Self {
        match bits & Self::DIV8.bits() {
            0b0000_0000_0000_0000 => Self::DIV1,
            0b0000_1000_0000_0000 => Self::DIV2,
            0b0001_0000_0000_0000 => Self::DIV4,
            _ => Self::DIV8,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
/// Bus ADC Resolution
/// Sets the resolution of the bus voltage conversion or the number of 12 bit samples averaged
pub enum BusADC {
    // 9 bit, 84 µs
    BIT9 = 0b0000_0000_0000_0000,
    // 10 bit, 148 µs
    BIT10 = 0b0000_0000_1000_0000,
    // 11 bit, 276 µs
    BIT11 = 0b0000_0001_0000_0000,
    // 12 bit, 532 µs (default)
    BIT12 = 0b0000_0001_1000_0000,
    // 2 samples, 1.06 ms
    SAMPLES2 = 0b0000_0100_1000_0000,
    // 4 samples, 2.13 ms
    SAMPLES4 = 0b0000_0101_0000_0000,
    // 8 samples, 4.26 ms
    SAMPLES8 = 0b0000_0101_1000_0000,
    // 16 samples, 8.51 ms
    SAMPLES16 = 0b0000_0110_0000_0000,
    // 32 samples, 17.02 ms
    SAMPLES32 = 0b0000_0110_1000_0000,
    // 64 samples, 34.05 ms
    SAMPLES64 = 0b0000_0111_0000_0000,
    // 128 samples, 68.10 ms
    SAMPLES128 = 0b0000_0111_1000_0000,
}

impl BusADC {
    const SHIFT: u16 = 7;

    #[inline(always)]
    pub fn bits(self) -> u16 {
        self as u16
    }

    fn from_bits(bits: u16) -> Self {
        match AdcCode::from_field((bits & Self::SAMPLES128.bits()) >> Self::SHIFT) {
            AdcCode::Bit9 => Self::BIT9,
            AdcCode::Bit10 => Self::BIT10,
            AdcCode::Bit11 => Self::BIT11,
            AdcCode::Bit12 => Self::BIT12,
            AdcCode::Samples2 => Self::SAMPLES2,
            AdcCode::Samples4 => Self::SAMPLES4,
            AdcCode::Samples8 => Self::SAMPLES8,
            AdcCode::Samples16 => Self::SAMPLES16,
            AdcCode::Samples32 => Self::SAMPLES32,
            AdcCode::Samples64 => Self::SAMPLES64,
            AdcCode::Samples128 => Self::SAMPLES128,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
/// Shunt ADC Resolution
/// Sets the resolution of the shunt voltage conversion or the number of 12 bit samples averaged
pub enum ShuntADC {
    // 9 bit, 84 µs
    BIT9 = 0b0000_0000_0000_0000,
    // 10 bit, 148 µs
    BIT10 = 0b0000_0000_0000_1000,
    // 11 bit, 276 µs
    BIT11 = 0b0000_0000_0001_0000,
    // 12 bit, 532 µs (default)
    BIT12 = 0b0000_0000_0001_1000,
    // 2 samples, 1.06 ms
    SAMPLES2 = 0b0000_0000_0100_1000,
    // 4 samples, 2.13 ms
    SAMPLES4 = 0b0000_0000_0101_0000,
    // 8 samples, 4.26 ms
    SAMPLES8 = 0b0000_0000_0101_1000,
    // 16 samples, 8.51 ms
    SAMPLES16 = 0b0000_0000_0110_0000,
    // 32 samples, 17.02 ms
    SAMPLES32 = 0b0000_0000_0110_1000,
    // 64 samples, 34.05 ms
    SAMPLES64 = 0b0000_0000_0111_0000,
    // 128 samples, 68.10 ms
    SAMPLES128 = 0b0000_0000_0111_1000,
}

impl ShuntADC {
    const SHIFT: u16 = 3;

    #[inline(always)]
    pub fn bits(self) -> u16 {
        self as u16
    }

    fn from_bits(bits: u16) -> Self {
        match AdcCode::from_field((bits & Self::SAMPLES128.bits()) >> Self::SHIFT) {
            AdcCode::Bit9 => Self::BIT9,
            AdcCode::Bit10 => Self::BIT10,
            AdcCode::Bit11 => Self::BIT11,
            AdcCode::Bit12 => Self::BIT12,
            AdcCode::Samples2 => Self::SAMPLES2,
            AdcCode::Samples4 => Self::SAMPLES4,
            AdcCode::Samples8 => Self::SAMPLES8,
            AdcCode::Samples16 => Self::SAMPLES16,
            AdcCode::Samples32 => Self::SAMPLES32,
            AdcCode::Samples64 => Self::SAMPLES64,
            AdcCode::Samples128 => Self::SAMPLES128,
        }
    }
}

/// The 4 bit ADC setting shared by the bus and shunt fields.
/// Codes 0b0100..=0b1000 are aliases of the plain resolution settings.
enum AdcCode {
    Bit9,
    Bit10,
    Bit11,
    Bit12,
    Samples2,
    Samples4,
    Samples8,
    Samples16,
    Samples32,
    Samples64,
    Samples128,
}

impl AdcCode {
    fn from_field(field: u16) -> Self {
        match field {
            0b1001 => Self::Samples2,
            0b1010 => Self::Samples4,
            0b1011 => Self::Samples8,
            0b1100 => Self::Samples16,
            0b1101 => Self::Samples32,
            0b1110 => Self::Samples64,
            0b1111 => Self::Samples128,
            0b1000 => Self::Bit12,
            f => match f & 0b0011 {
                0b00 => Self::Bit9,
                0b01 => Self::Bit10,
                0b10 => Self::Bit11,
                _ => Self::Bit12,
            },
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
/// Operating Mode
/// Selects continuous, triggered, or power-down mode of operation.
pub enum OperMode {
    // Power-Down
    POWERDOWN = 0b0000_0000_0000_0000,
    // Shunt Voltage, Triggered
    SVT = 0b0000_0000_0000_0001,
    // Bus Voltage, Triggered
    BVT = 0b0000_0000_0000_0010,
    // Shunt Voltage + Bus Voltage, Triggered
    SVBVT = 0b0000_0000_0000_0011,
    // ADC off (disabled)
    ADCOFF = 0b0000_0000_0000_0100,
    // Shunt Voltage, Continuous
    SVC = 0b0000_0000_0000_0101,
    // Bus Voltage, Continuous
    BVC = 0b0000_0000_0000_0110,
    // Shunt Voltage + Bus Voltage, Continuous (default)
    SVBVC = 0b0000_0000_0000_0111,
}

impl OperMode {
    #[inline(always)]
    pub fn bits(self) -> u16 {
        self as u16
    }

    fn from_bits(bits: u16) -> Self {
        match bits & Self::SVBVC.bits() {
            0 => Self::POWERDOWN,
            1 => Self::SVT,
            2 => Self::BVT,
            3 => Self::SVBVT,
            4 => Self::ADCOFF,
            5 => Self::SVC,
            6 => Self::BVC,
            _ => Self::SVBVC,
        }
    }
}

/// Content of the configuration register
///
/// The default is what the driver programs on reset: 32V bus range, /8 shunt gain,
/// 12 bit bus and shunt conversion and continuous shunt and bus measurement.
///
/// ```rust
/// use ina219_monitor::{BusADC, Configuration, ShuntADC};
///
/// let conf = Configuration {
///     bus_adc: BusADC::SAMPLES16,
///     shunt_adc: ShuntADC::SAMPLES16,
///     ..Default::default()
/// };
/// assert_eq!(conf.bits(), 0x3E67);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Configuration {
    pub bus_voltage_range: BusVoltageRange,
    pub shunt_gain: ShuntGain,
    pub bus_adc: BusADC,
    pub shunt_adc: ShuntADC,
    pub mode: OperMode,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            bus_voltage_range: BusVoltageRange::FSR32V,
            shunt_gain: ShuntGain::DIV8,
            bus_adc: BusADC::BIT12,
            shunt_adc: ShuntADC::BIT12,
            mode: OperMode::SVBVC,
        }
    }
}

impl Configuration {
    /// Assemble the configuration register word
    pub fn bits(self) -> u16 {
        self.bus_voltage_range.bits()
            | self.shunt_gain.bits()
            | self.bus_adc.bits()
            | self.shunt_adc.bits()
            | self.mode.bits()
    }

    /// Split a configuration register word into its fields, ignoring the reset bit
    pub fn from_bits(bits: u16) -> Self {
        Self {
            bus_voltage_range: BusVoltageRange::from_bits(bits),
            shunt_gain: ShuntGain::from_bits(bits),
            bus_adc: BusADC::from_bits(bits),
            shunt_adc: ShuntADC::from_bits(bits),
            mode: OperMode::from_bits(bits),
        }
    }
}

/// Driver errors, generic over the I2C bus error
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Error<E> {
    /// A register transaction failed
    I2c(E),
    /// The configuration register did not hold the INA219 power-on default
    NotDetected,
    /// A write during the reset sequence failed, the chip may be half configured
    Reset(E),
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::I2c(e)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C transaction failed: {:?}", e),
            Error::NotDetected => f.write_str("no INA219 found at this address"),
            Error::Reset(e) => write!(f, "could not reset INA219: {:?}", e),
        }
    }
}

#[maybe_async_cfg::maybe(
    sync(feature = "sync", self = "INA219"),
    async(feature = "async", keep_self)
)]
pub struct AsyncINA219<I2C> {
    i2c: I2C,
    address: u8,
    state: u16,
    shunt_ohms: f32,
}

#[maybe_async_cfg::maybe(
    sync(
        feature = "sync",
        self = "INA219",
        idents(
            AsyncI2c(sync = "I2c"),
            AsyncErrorType(sync = "ErrorType"),
            AsyncDelayNs(sync = "DelayNs")
        )
    ),
    async(feature = "async", keep_self)
)]
impl<I2C: AsyncI2c + AsyncErrorType> AsyncINA219<I2C> {
    /// Add a new driver for a INA219 chip found on the I2C bus at the specified address
    ///
    /// The chip is identified by its power-on configuration, then reset and configured with
    /// [`Configuration::default`]. The shunt resistance starts at [`DEFAULT_SHUNT_OHMS`].
    /// Pass `&mut i2c` to keep ownership of the bus.
    pub async fn new_with_address<D: AsyncDelayNs>(
        mut i2c: I2C,
        address: u8,
        delay: &mut D,
    ) -> Result<Self, Error<I2C::Error>> {
        if !Self::detect(&mut i2c, address).await {
            error!("I2C {:#x} is not an INA219", address);
            return Err(Error::NotDetected);
        }

        let mut ina219 = Self {
            i2c,
            address,
            state: POWER_ON_CONFIG,
            shunt_ohms: 0.0,
        };

        if let Err(e) = ina219.reset(delay).await {
            warn!("Could not reset INA219 at I2C {:#x}", address);
            return Err(e);
        }

        info!("INA219 initialized at I2C {:#x}", address);
        Ok(ina219)
    }

    #[inline(always)]
    pub async fn new<D: AsyncDelayNs>(i2c: I2C, delay: &mut D) -> Result<Self, Error<I2C::Error>> {
        Self::new_with_address(i2c, DEFAULT_ADDRESS, delay).await
    }

    /// Destroy the driver and hand back the bus. The chip is left running.
    #[inline(always)]
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Take the driver out of `slot` and release it. An empty slot is left alone.
    pub fn destroy(slot: &mut Option<Self>) -> Option<I2C> {
        slot.take().map(Self::release)
    }

    #[inline(always)]
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Check whether the configuration register at `address` holds the power-on default
    ///
    /// This is a heuristic: the INA219 has no identification register, and a chip that was
    /// already configured by someone else will not be recognised.
    pub async fn detect(i2c: &mut I2C, address: u8) -> bool {
        let mut buffer = [0u8; 2];
        match i2c
            .write_read(address, &[Register::CONFIG.addr()], &mut buffer)
            .await
        {
            Ok(()) if u16::from_be_bytes(buffer) == POWER_ON_CONFIG => true,
            Ok(()) => {
                debug!(
                    "Config register at I2C {:#x} reads {:#x}",
                    address,
                    u16::from_be_bytes(buffer)
                );
                false
            }
            Err(e) => {
                debug!(
                    "Config register at I2C {:#x} unreadable: {:?}",
                    address,
                    e.kind()
                );
                false
            }
        }
    }

    /// Reset the chip, program the default configuration and restore the default shunt
    /// resistance
    ///
    /// Each configuration write is followed by a 2ms settle time. A failed write aborts the
    /// sequence without any attempt to restore the previous configuration.
    pub async fn reset<D: AsyncDelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I2C::Error>> {
        self.write_reg(Register::CONFIG, RESET)
            .await
            .map_err(Error::Reset)?;
        self.state = POWER_ON_CONFIG;
        delay.delay_us(SETTLE_TIME_US).await;

        let config = Configuration::default().bits();
        self.write_reg(Register::CONFIG, config)
            .await
            .map_err(Error::Reset)?;
        self.state = config;
        delay.delay_us(SETTLE_TIME_US).await;

        self.set_shunt_resistance(DEFAULT_SHUNT_OHMS);
        Ok(())
    }

    /// Last configuration written to the chip
    #[inline(always)]
    pub fn configuration(&self) -> Configuration {
        Configuration::from_bits(self.state)
    }

    /// Write a complete configuration
    pub async fn set_configuration(&mut self, c: Configuration) -> Result<(), Error<I2C::Error>> {
        self.modify_config(0xFFFF, c.bits()).await
    }

    /// Change the bus voltage full scale range
    #[inline(always)]
    pub async fn set_bus_voltage_range(
        &mut self,
        r: BusVoltageRange,
    ) -> Result<(), Error<I2C::Error>> {
        self.modify_config(BusVoltageRange::FSR32V.bits(), r.bits())
            .await
    }

    /// Change the shunt voltage gain
    #[inline(always)]
    pub async fn set_shunt_gain(&mut self, g: ShuntGain) -> Result<(), Error<I2C::Error>> {
        self.modify_config(ShuntGain::DIV8.bits(), g.bits()).await
    }

    /// Change the bus voltage resolution or averaging
    #[inline(always)]
    pub async fn set_bus_adc(&mut self, b: BusADC) -> Result<(), Error<I2C::Error>> {
        self.modify_config(BusADC::SAMPLES128.bits(), b.bits()).await
    }

    /// Change the shunt voltage resolution or averaging
    #[inline(always)]
    pub async fn set_shunt_adc(&mut self, s: ShuntADC) -> Result<(), Error<I2C::Error>> {
        self.modify_config(ShuntADC::SAMPLES128.bits(), s.bits())
            .await
    }

    /// Change the operating mode of the INA219. Please note that if you change to Triggered mode,
    /// you'll have to call this method again each time you would like to get a new sample.
    #[inline(always)]
    pub async fn set_operating_mode(&mut self, o: OperMode) -> Result<(), Error<I2C::Error>> {
        self.modify_config(OperMode::SVBVC.bits(), o.bits()).await
    }

    /// Set the shunt resistance in Ohms used to derive the current
    ///
    /// The value is not checked. A zero resistance makes [`current`](Self::current) report
    /// infinity (or NaN for a zero shunt voltage), a negative one flips its sign.
    #[inline(always)]
    pub fn set_shunt_resistance(&mut self, ohms: f32) {
        self.shunt_ohms = ohms;
    }

    /// The shunt resistance in Ohms
    #[inline(always)]
    pub fn shunt_resistance(&self) -> f32 {
        self.shunt_ohms
    }

    /// Delivers the bus voltage register including the status flags in the lowest 3 bits
    #[inline(always)]
    pub async fn bus_voltage_raw(&mut self) -> Result<i16, Error<I2C::Error>> {
        let raw = self
            .read_reg(Register::BUS_VOLTAGE)
            .await? as i16;
        debug!("Vbus raw = {}", raw);
        Ok(raw)
    }

    /// Delivers the measured bus voltage in V
    pub async fn bus_voltage(&mut self) -> Result<f32, Error<I2C::Error>> {
        // Truncating division, the register is non-negative in practice
        let raw = self.bus_voltage_raw().await? / 8;
        Ok(cast::f32(raw) * BUS_VOLTAGE_LSB)
    }

    /// Whether a conversion completed since the last read of the power register
    pub async fn conversion_ready(&mut self) -> Result<bool, Error<I2C::Error>> {
        let raw = self.bus_voltage_raw().await? as u16;
        Ok(raw & CNVR != 0)
    }

    /// Whether the power or current calculation overflowed
    pub async fn math_overflow(&mut self) -> Result<bool, Error<I2C::Error>> {
        let raw = self.bus_voltage_raw().await? as u16;
        Ok(raw & OVF != 0)
    }

    /// Delivers the shunt voltage register as signed counts
    #[inline(always)]
    pub async fn shunt_voltage_raw(&mut self) -> Result<i16, Error<I2C::Error>> {
        let raw = self
            .read_reg(Register::SHUNT_VOLTAGE)
            .await? as i16;
        debug!("Vshunt raw = {}", raw);
        Ok(raw)
    }

    /// Delivers the shunt voltage in V, negative for reverse current
    pub async fn shunt_voltage(&mut self) -> Result<f32, Error<I2C::Error>> {
        let raw = self.shunt_voltage_raw().await?;
        Ok(cast::f32(raw) / SHUNT_COUNTS_PER_VOLT)
    }

    /// Delivers the current in A, derived from the shunt voltage and the shunt resistance
    pub async fn current(&mut self) -> Result<f32, Error<I2C::Error>> {
        let volts = self.shunt_voltage().await?;
        let amps = volts / self.shunt_ohms;
        trace!("Rshunt = {} Ohm, Ishunt = {} A", self.shunt_ohms, amps);
        Ok(amps)
    }

    async fn modify_config(&mut self, mask: u16, bits: u16) -> Result<(), Error<I2C::Error>> {
        let state = (self.state & !mask) | bits;
        self.write_reg(Register::CONFIG, state).await?;
        self.state = state;
        Ok(())
    }

    #[inline(always)]
    async fn write_reg<R: Into<u8>>(&mut self, reg: R, value: u16) -> Result<(), I2C::Error> {
        let reg = reg.into();
        debug!("Write {:#x} to register {:#x}", value, reg);
        let bytes = value.to_be_bytes();
        self.i2c
            .write(self.address, &[reg, bytes[0], bytes[1]])
            .await
    }

    #[inline(always)]
    async fn read_reg<R: Into<u8>>(&mut self, reg: R) -> Result<u16, I2C::Error> {
        let mut buffer = [0u8; 2];
        self.i2c
            .write_read(self.address, &[reg.into()], &mut buffer)
            .await?;
        Ok(u16::from_be_bytes(buffer))
    }
}
