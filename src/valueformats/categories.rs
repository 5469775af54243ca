//! Built-in unit catalog, grouped the way unit pickers present it.

use super::builders::{
    binary_si_prefix, currency, decimal_si_prefix, locale, scaled_units, sci, simple_count_unit,
    to_fixed, to_fixed_unit, to_hex, to_hex0x, to_percent, to_percent_unit,
};
use super::time::{
    TimeScale, date_time_as_iso, date_time_as_us, date_time_from_now, to_clock, to_days,
    to_duration, to_hh_mm_ss, to_hours, to_microseconds, to_milliseconds, to_minutes,
    to_nanoseconds, to_seconds, to_timeticks,
};
use super::{ValueFormat, ValueFormatCategory, ValueFormatter, formatter};

fn format(name: &str, id: &str, formatter: ValueFormatter) -> ValueFormat {
    ValueFormat {
        name: name.to_string(),
        id: id.to_string(),
        formatter,
    }
}

fn category(name: &str, formats: Vec<ValueFormat>) -> ValueFormatCategory {
    ValueFormatCategory {
        name: name.to_string(),
        formats,
    }
}

/// The full built-in catalog in menu order.
pub fn builtin_categories() -> Vec<ValueFormatCategory> {
    vec![
        category(
            "none",
            vec![
                format("none", "none", formatter(|v, d, _| to_fixed(v, d))),
                format(
                    "short",
                    "short",
                    scaled_units(
                        1000.0,
                        &["", " K", " Mil", " Bil", " Tri", " Quadr", " Quint", " Sext", " Sept"],
                    ),
                ),
                format("percent (0-100)", "percent", formatter(to_percent)),
                format("percent (0.0-1.0)", "percentunit", formatter(to_percent_unit)),
                format("Humidity (%H)", "humidity", to_fixed_unit("%H")),
                format("decibel", "dB", to_fixed_unit("dB")),
                format("hexadecimal (0x)", "hex0x", formatter(to_hex0x)),
                format("hexadecimal", "hex", formatter(to_hex)),
                format("scientific notation", "sci", formatter(sci)),
                format("locale format", "locale", formatter(locale)),
            ],
        ),
        category(
            "currency",
            vec![
                format("Dollars ($)", "currencyUSD", currency("$")),
                format("Pounds (£)", "currencyGBP", currency("£")),
                format("Euro (€)", "currencyEUR", currency("€")),
                format("Yen (¥)", "currencyJPY", currency("¥")),
                format("Rubles (₽)", "currencyRUB", currency("₽")),
                format("Hryvnias (₴)", "currencyUAH", currency("₴")),
                format("Real (R$)", "currencyBRL", currency("R$")),
                format("Danish Krone (kr)", "currencyDKK", currency("kr")),
                format("Icelandic Króna (kr)", "currencyISK", currency("kr")),
                format("Norwegian Krone (kr)", "currencyNOK", currency("kr")),
                format("Swedish Krona (kr)", "currencySEK", currency("kr")),
                format("Czech koruna (czk)", "currencyCZK", currency("czk")),
                format("Swiss franc (CHF)", "currencyCHF", currency("CHF")),
                format("Polish Złoty (PLN)", "currencyPLN", currency("zł")),
                format("Bitcoin (฿)", "currencyBTC", currency("฿")),
            ],
        ),
        category(
            "time",
            vec![
                format("Hertz (1/s)", "hertz", decimal_si_prefix("Hz", 0)),
                format("nanoseconds (ns)", "ns", formatter(to_nanoseconds)),
                format("microseconds (µs)", "µs", formatter(to_microseconds)),
                format("milliseconds (ms)", "ms", formatter(to_milliseconds)),
                format("seconds (s)", "s", formatter(to_seconds)),
                format("minutes (m)", "m", formatter(to_minutes)),
                format("hours (h)", "h", formatter(to_hours)),
                format("days (d)", "d", formatter(to_days)),
                format(
                    "duration (ms)",
                    "dtdurationms",
                    formatter(|v, d, _| to_duration(v, d, TimeScale::Millisecond)),
                ),
                format(
                    "duration (s)",
                    "dtdurations",
                    formatter(|v, d, _| to_duration(v, d, TimeScale::Second)),
                ),
                format("duration (hh:mm:ss)", "dthms", formatter(to_hh_mm_ss)),
                format("Timeticks (s/100)", "timeticks", formatter(to_timeticks)),
                format("clock (ms)", "clockms", formatter(|v, d, _| to_clock(v, d))),
                format(
                    "clock (s)",
                    "clocks",
                    formatter(|v, d, _| to_clock(v.map(|s| s * 1000.0), d)),
                ),
            ],
        ),
        category(
            "date & time",
            vec![
                format("YYYY-MM-DD HH:mm:ss", "dateTimeAsIso", formatter(date_time_as_iso)),
                format("MM/DD/YYYY h:mm:ss a", "dateTimeAsUS", formatter(date_time_as_us)),
                format("From Now", "dateTimeFromNow", formatter(date_time_from_now)),
            ],
        ),
        category(
            "data (IEC)",
            vec![
                format("bits", "bits", binary_si_prefix("b", 0)),
                format("bytes", "bytes", binary_si_prefix("B", 0)),
                format("kibibytes", "kbytes", binary_si_prefix("B", 1)),
                format("mebibytes", "mbytes", binary_si_prefix("B", 2)),
                format("gibibytes", "gbytes", binary_si_prefix("B", 3)),
            ],
        ),
        category(
            "data (Metric)",
            vec![
                format("bits", "decbits", decimal_si_prefix("b", 0)),
                format("bytes", "decbytes", decimal_si_prefix("B", 0)),
                format("kilobytes", "deckbytes", decimal_si_prefix("B", 1)),
                format("megabytes", "decmbytes", decimal_si_prefix("B", 2)),
                format("gigabytes", "decgbytes", decimal_si_prefix("B", 3)),
            ],
        ),
        category(
            "data rate",
            vec![
                format("packets/sec", "pps", decimal_si_prefix("pps", 0)),
                format("bits/sec", "bps", decimal_si_prefix("bps", 0)),
                format("bytes/sec", "Bps", decimal_si_prefix("B/s", 0)),
                format("kilobits/sec", "Kbits", decimal_si_prefix("bps", 1)),
                format("kilobytes/sec", "KBs", decimal_si_prefix("Bs", 1)),
                format("megabits/sec", "Mbits", decimal_si_prefix("bps", 2)),
                format("megabytes/sec", "MBs", decimal_si_prefix("Bs", 2)),
                format("gigabytes/sec", "GBs", decimal_si_prefix("Bs", 3)),
                format("gigabits/sec", "Gbits", decimal_si_prefix("bps", 3)),
            ],
        ),
        category(
            "hash rate",
            vec![
                format("hashes/sec", "Hs", decimal_si_prefix("H/s", 0)),
                format("kilohashes/sec", "KHs", decimal_si_prefix("H/s", 1)),
                format("megahashes/sec", "MHs", decimal_si_prefix("H/s", 2)),
                format("gigahashes/sec", "GHs", decimal_si_prefix("H/s", 3)),
                format("terahashes/sec", "THs", decimal_si_prefix("H/s", 4)),
                format("petahashes/sec", "PHs", decimal_si_prefix("H/s", 5)),
                format("exahashes/sec", "EHs", decimal_si_prefix("H/s", 6)),
            ],
        ),
        category(
            "throughput",
            vec![
                format("ops/sec (ops)", "ops", simple_count_unit("ops")),
                format("requests/sec (rps)", "reqps", simple_count_unit("reqps")),
                format("reads/sec (rps)", "rps", simple_count_unit("rps")),
                format("writes/sec (wps)", "wps", simple_count_unit("wps")),
                format("I/O ops/sec (iops)", "iops", simple_count_unit("iops")),
                format("ops/min (opm)", "opm", simple_count_unit("opm")),
                format("reads/min (rpm)", "rpm", simple_count_unit("rpm")),
                format("writes/min (wpm)", "wpm", simple_count_unit("wpm")),
            ],
        ),
        category(
            "length",
            vec![
                format("millimetre (mm)", "lengthmm", decimal_si_prefix("m", -1)),
                format("meter (m)", "lengthm", decimal_si_prefix("m", 0)),
                format("feet (ft)", "lengthft", to_fixed_unit("ft")),
                format("kilometer (km)", "lengthkm", decimal_si_prefix("m", 1)),
                format("mile (mi)", "lengthmi", to_fixed_unit("mi")),
            ],
        ),
        category(
            "area",
            vec![
                format("Square Meters (m²)", "areaM2", to_fixed_unit("m²")),
                format("Square Feet (ft²)", "areaF2", to_fixed_unit("ft²")),
                format("Square Miles (mi²)", "areaMI2", to_fixed_unit("mi²")),
            ],
        ),
        category(
            "mass",
            vec![
                format("milligram (mg)", "massmg", decimal_si_prefix("g", -1)),
                format("gram (g)", "massg", decimal_si_prefix("g", 0)),
                format("kilogram (kg)", "masskg", decimal_si_prefix("g", 1)),
                format("metric ton (t)", "masst", to_fixed_unit("t")),
            ],
        ),
        category(
            "velocity",
            vec![
                format("metres/second (m/s)", "velocityms", to_fixed_unit("m/s")),
                format("kilometers/hour (km/h)", "velocitykmh", to_fixed_unit("km/h")),
                format("miles/hour (mph)", "velocitymph", to_fixed_unit("mph")),
                format("knot (kn)", "velocityknot", to_fixed_unit("kn")),
            ],
        ),
        category(
            "volume",
            vec![
                format("millilitre (mL)", "mlitre", decimal_si_prefix("L", -1)),
                format("litre (L)", "litre", decimal_si_prefix("L", 0)),
                format("cubic metre", "m3", to_fixed_unit("m³")),
                format("Normal cubic metre", "Nm3", to_fixed_unit("Nm³")),
                format("cubic decimetre", "dm3", to_fixed_unit("dm³")),
                format("gallons", "gallons", to_fixed_unit("gal")),
            ],
        ),
        category(
            "energy",
            vec![
                format("Watt (W)", "watt", decimal_si_prefix("W", 0)),
                format("Kilowatt (kW)", "kwatt", decimal_si_prefix("W", 1)),
                format("Milliwatt (mW)", "mwatt", decimal_si_prefix("W", -1)),
                format("Watt per square metre (W/m²)", "Wm2", to_fixed_unit("W/m²")),
                format("Volt-ampere (VA)", "voltamp", decimal_si_prefix("VA", 0)),
                format("Kilovolt-ampere (kVA)", "kvoltamp", decimal_si_prefix("VA", 1)),
                format("Volt-ampere reactive (var)", "voltampreact", decimal_si_prefix("var", 0)),
                format(
                    "Kilovolt-ampere reactive (kvar)",
                    "kvoltampreact",
                    decimal_si_prefix("var", 1),
                ),
                format("Watt-hour (Wh)", "watth", decimal_si_prefix("Wh", 0)),
                format("Kilowatt-hour (kWh)", "kwatth", decimal_si_prefix("Wh", 1)),
                format("Kilowatt-min (kWm)", "kwattm", decimal_si_prefix("W/Min", 1)),
                format("Joule (J)", "joule", decimal_si_prefix("J", 0)),
                format("Electron volt (eV)", "ev", decimal_si_prefix("eV", 0)),
                format("Ampere (A)", "amp", decimal_si_prefix("A", 0)),
                format("Kiloampere (kA)", "kamp", decimal_si_prefix("A", 1)),
                format("Milliampere (mA)", "mamp", decimal_si_prefix("A", -1)),
                format("Volt (V)", "volt", decimal_si_prefix("V", 0)),
                format("Kilovolt (kV)", "kvolt", decimal_si_prefix("V", 1)),
                format("Millivolt (mV)", "mvolt", decimal_si_prefix("V", -1)),
                format("Decibel-milliwatt (dBm)", "dBm", decimal_si_prefix("dBm", 0)),
                format("Ohm (Ω)", "ohm", decimal_si_prefix("Ω", 0)),
                format("Lumens (Lm)", "lumens", decimal_si_prefix("Lm", 0)),
            ],
        ),
        category(
            "temperature",
            vec![
                format("Celsius (°C)", "celsius", to_fixed_unit("°C")),
                format("Farenheit (°F)", "farenheit", to_fixed_unit("°F")),
                format("Kelvin (K)", "kelvin", to_fixed_unit("K")),
            ],
        ),
        category(
            "pressure",
            vec![
                format("Millibars", "pressurembar", decimal_si_prefix("bar", -1)),
                format("Bars", "pressurebar", decimal_si_prefix("bar", 0)),
                format("Kilobars", "pressurekbar", decimal_si_prefix("bar", 1)),
                format("Hectopascals", "pressurehpa", to_fixed_unit("hPa")),
                format("Kilopascals", "pressurekpa", to_fixed_unit("kPa")),
                format("Inches of mercury", "pressurehg", to_fixed_unit("\"Hg")),
                format(
                    "PSI",
                    "pressurepsi",
                    scaled_units(1000.0, &[" psi", " ksi", " Mpsi"]),
                ),
            ],
        ),
        category(
            "force",
            vec![
                format("Newton-meters (Nm)", "forceNm", decimal_si_prefix("Nm", 0)),
                format("Kilonewton-meters (kNm)", "forcekNm", decimal_si_prefix("Nm", 1)),
                format("Newtons (N)", "forceN", decimal_si_prefix("N", 0)),
                format("Kilonewtons (kN)", "forcekN", decimal_si_prefix("N", 1)),
            ],
        ),
        category(
            "flow",
            vec![
                format("Gallons/min (gpm)", "flowgpm", to_fixed_unit("gpm")),
                format("Cubic meters/sec (cms)", "flowcms", to_fixed_unit("cms")),
                format("Cubic feet/sec (cfs)", "flowcfs", to_fixed_unit("cfs")),
                format("Cubic feet/min (cfm)", "flowcfm", to_fixed_unit("cfm")),
                format("Litre/hour", "litreh", to_fixed_unit("l/h")),
                format("Litre/min (l/min)", "flowlpm", to_fixed_unit("l/min")),
                format("milliLitre/min (mL/min)", "flowmlpm", to_fixed_unit("mL/min")),
            ],
        ),
        category(
            "angle",
            vec![
                format("Degrees (°)", "degree", to_fixed_unit("°")),
                format("Radians", "radian", to_fixed_unit("rad")),
                format("Gradian", "grad", to_fixed_unit("grad")),
            ],
        ),
        category(
            "acceleration",
            vec![
                format("Meters/sec²", "accMS2", to_fixed_unit("m/sec²")),
                format("Feet/sec²", "accFS2", to_fixed_unit("f/sec²")),
                format("G unit", "accG", to_fixed_unit("g")),
            ],
        ),
        category(
            "radiation",
            vec![
                format("Becquerel (Bq)", "radbq", decimal_si_prefix("Bq", 0)),
                format("curie (Ci)", "radci", decimal_si_prefix("Ci", 0)),
                format("Gray (Gy)", "radgy", decimal_si_prefix("Gy", 0)),
                format("rad", "radrad", decimal_si_prefix("rad", 0)),
                format("Sievert (Sv)", "radsv", decimal_si_prefix("Sv", 0)),
                format("rem", "radrem", decimal_si_prefix("rem", 0)),
                format("Exposure (C/kg)", "radexpckg", decimal_si_prefix("C/kg", 0)),
                format("roentgen (R)", "radr", decimal_si_prefix("R", 0)),
                format("Sievert/hour (Sv/h)", "radsvh", decimal_si_prefix("Sv/h", 0)),
            ],
        ),
        category(
            "concentration",
            vec![
                format("parts-per-million (ppm)", "ppm", to_fixed_unit("ppm")),
                format("parts-per-billion (ppb)", "conppb", to_fixed_unit("ppb")),
                format("nanogram per cubic metre (ng/m³)", "conngm3", to_fixed_unit("ng/m³")),
                format(
                    "nanogram per normal cubic metre (ng/Nm³)",
                    "conngNm3",
                    to_fixed_unit("ng/Nm³"),
                ),
                format("microgram per cubic metre (μg/m³)", "conμgm3", to_fixed_unit("μg/m³")),
                format(
                    "microgram per normal cubic metre (μg/Nm³)",
                    "conμgNm3",
                    to_fixed_unit("μg/Nm³"),
                ),
                format("milligram per cubic metre (mg/m³)", "conmgm3", to_fixed_unit("mg/m³")),
                format(
                    "milligram per normal cubic metre (mg/Nm³)",
                    "conmgNm3",
                    to_fixed_unit("mg/Nm³"),
                ),
                format("gram per cubic metre (g/m³)", "congm3", to_fixed_unit("g/m³")),
                format(
                    "gram per normal cubic metre (g/Nm³)",
                    "congNm3",
                    to_fixed_unit("g/Nm³"),
                ),
            ],
        ),
    ]
}
