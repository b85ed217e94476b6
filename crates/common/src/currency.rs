/// English display name for an ISO 4217 currency code.
///
/// Returns `None` for codes without a known name; callers fall back to the code.
pub fn currency_name(code: &str) -> Option<&'static str> {
    let name = match code.to_ascii_uppercase().as_str() {
        "AED" => "United Arab Emirates Dirham",
        "ARS" => "Argentine Peso",
        "AUD" => "Australian Dollar",
        "BDT" => "Bangladeshi Taka",
        "BOB" => "Bolivian Boliviano",
        "BRL" => "Brazilian Real",
        "CAD" => "Canadian Dollar",
        "CHF" => "Swiss Franc",
        "CLP" => "Chilean Peso",
        "CNY" => "Chinese Yuan",
        "COP" => "Colombian Peso",
        "CRC" => "Costa Rican Colón",
        "CUP" => "Cuban Peso",
        "CZK" => "Czech Koruna",
        "DKK" => "Danish Krone",
        "DOP" => "Dominican Peso",
        "EGP" => "Egyptian Pound",
        "ETB" => "Ethiopian Birr",
        "EUR" => "Euro",
        "GBP" => "British Pound",
        "GHS" => "Ghanaian Cedi",
        "GTQ" => "Guatemalan Quetzal",
        "HKD" => "Hong Kong Dollar",
        "HNL" => "Honduran Lempira",
        "HUF" => "Hungarian Forint",
        "IDR" => "Indonesian Rupiah",
        "ILS" => "Israeli New Shekel",
        "INR" => "Indian Rupee",
        "IRR" => "Iranian Rial",
        "JMD" => "Jamaican Dollar",
        "JPY" => "Japanese Yen",
        "KES" => "Kenyan Shilling",
        "KRW" => "South Korean Won",
        "KZT" => "Kazakhstani Tenge",
        "LBP" => "Lebanese Pound",
        "LKR" => "Sri Lankan Rupee",
        "MAD" => "Moroccan Dirham",
        "MXN" => "Mexican Peso",
        "MYR" => "Malaysian Ringgit",
        "NGN" => "Nigerian Naira",
        "NIO" => "Nicaraguan Córdoba",
        "NOK" => "Norwegian Krone",
        "NZD" => "New Zealand Dollar",
        "PAB" => "Panamanian Balboa",
        "PEN" => "Peruvian Sol",
        "PHP" => "Philippine Peso",
        "PKR" => "Pakistani Rupee",
        "PLN" => "Polish Zloty",
        "PYG" => "Paraguayan Guarani",
        "QAR" => "Qatari Riyal",
        "RON" => "Romanian Leu",
        "RUB" => "Russian Ruble",
        "SAR" => "Saudi Riyal",
        "SEK" => "Swedish Krona",
        "SGD" => "Singapore Dollar",
        "THB" => "Thai Baht",
        "TRY" => "Turkish Lira",
        "TWD" => "New Taiwan Dollar",
        "TZS" => "Tanzanian Shilling",
        "UAH" => "Ukrainian Hryvnia",
        "UGX" => "Ugandan Shilling",
        "USD" => "US Dollar",
        "UYU" => "Uruguayan Peso",
        "VES" => "Venezuelan Bolívar",
        "VND" => "Vietnamese Dong",
        "XAF" => "Central African CFA Franc",
        "XOF" => "West African CFA Franc",
        "ZAR" => "South African Rand",
        _ => return None,
    };
    Some(name)
}
