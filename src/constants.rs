// ABOUTME: Physiological and nutritional constants used by the calculation engine
// ABOUTME: Formula coefficients, energy densities and input ranges with literature references
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrimetric Contributors

//! Physiological constants based on clinical nutrition research
//!
//! Values that callers may want to tune per practice (activity factors,
//! safety floors, hydration allowances) live in [`crate::config`]; the
//! constants here are fixed by the published formulas themselves.

/// Energy density of macronutrients and body mass
///
/// References:
/// - Atwater general factors (USDA Agriculture Handbook No. 74, 1973)
/// - Wishnofsky, M. (1958). Caloric equivalents of gained or lost weight.
///   *American Journal of Clinical Nutrition*, 6(5), 542-546.
pub mod energy {
    /// Protein energy density (kcal/g)
    pub const PROTEIN_KCAL_PER_GRAM: f64 = 4.0;

    /// Carbohydrate energy density (kcal/g)
    pub const CARB_KCAL_PER_GRAM: f64 = 4.0;

    /// Fat energy density (kcal/g)
    pub const FAT_KCAL_PER_GRAM: f64 = 9.0;

    /// Energy stored in one kilogram of body mass (kcal)
    pub const KCAL_PER_KG_BODY_MASS: f64 = 7700.0;

    /// Days per week used by weekly projections
    pub const DAYS_PER_WEEK: f64 = 7.0;
}

/// Mifflin-St Jeor coefficients
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for resting
/// energy expenditure. *Am J Clin Nutr*, 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
pub mod mifflin {
    /// kcal per kg body weight
    pub const WEIGHT_COEF: f64 = 10.0;
    /// kcal per cm height
    pub const HEIGHT_COEF: f64 = 6.25;
    /// kcal per year of age (subtracted)
    pub const AGE_COEF: f64 = 5.0;
    /// Male constant
    pub const MALE_CONSTANT: f64 = 5.0;
    /// Female constant
    pub const FEMALE_CONSTANT: f64 = -161.0;
}

/// Revised Harris-Benedict coefficients
///
/// Reference: Roza, A.M., & Shizgal, H.M. (1984). The Harris Benedict equation
/// reevaluated. *Am J Clin Nutr*, 40(1), 168-182. DOI: 10.1093/ajcn/40.1.168
pub mod harris_benedict {
    /// Male: constant, weight, height, age coefficients
    pub const MALE: [f64; 4] = [88.362, 13.397, 4.799, 5.677];
    /// Female: constant, weight, height, age coefficients
    pub const FEMALE: [f64; 4] = [447.593, 9.247, 3.098, 4.330];
}

/// Katch-McArdle coefficients
///
/// Reference: McArdle, W.D., Katch, F.I., & Katch, V.L. (2010). *Exercise Physiology*.
pub mod katch_mcardle {
    /// Constant term (kcal/day)
    pub const CONSTANT: f64 = 370.0;
    /// kcal per kg lean body mass
    pub const LEAN_MASS_COEF: f64 = 21.6;
}

/// Body composition formula coefficients
pub mod body_composition {
    /// US Navy circumference method, male: constant, log10(waist-neck), log10(height)
    ///
    /// Reference: Hodgdon, J.A., & Beckett, M.B. (1984). Prediction of percent body fat
    /// for U.S. Navy men and women from body circumferences and height. NHRC Report 84-11.
    pub const NAVY_MALE: [f64; 3] = [1.0324, 0.19077, 0.15456];

    /// US Navy circumference method, female: constant, log10(waist+hip-neck), log10(height)
    pub const NAVY_FEMALE: [f64; 3] = [1.29579, 0.35004, 0.22100];

    /// Numerator of the Siri density-to-fat conversion used by the Navy method
    pub const SIRI_NUMERATOR: f64 = 495.0;

    /// Offset of the Siri conversion
    pub const SIRI_OFFSET: f64 = 450.0;

    /// Deurenberg adult equation: BMI, age, sex (1 = male), constant
    ///
    /// Reference: Deurenberg, P., et al. (1991). Body mass index as a measure of body
    /// fatness. *Br J Nutr*, 65(2), 105-114. DOI: 10.1079/BJN19910073
    pub const DEURENBERG: [f64; 4] = [1.20, 0.23, 10.8, 5.4];

    /// Boer lean body mass, male: weight, height, constant
    ///
    /// Reference: Boer, P. (1984). Estimated lean body mass as an index for
    /// normalization of body fluid volumes in humans. *Am J Physiol*, 247, F632-F636.
    pub const BOER_MALE: [f64; 3] = [0.407, 0.267, 19.2];
    /// Boer lean body mass, female: weight, height, constant
    pub const BOER_FEMALE: [f64; 3] = [0.252, 0.473, 48.3];

    /// Hume lean body mass, male: weight, height, constant
    ///
    /// Reference: Hume, R. (1966). Prediction of lean body mass from height and
    /// weight. *J Clin Pathol*, 19(4), 389-391.
    pub const HUME_MALE: [f64; 3] = [0.328_10, 0.339_29, 29.5336];
    /// Hume lean body mass, female: weight, height, constant
    pub const HUME_FEMALE: [f64; 3] = [0.295_69, 0.418_13, 43.2933];

    /// FFMI height normalization slope (kg/m² per meter)
    ///
    /// Reference: Kouri, E.M., et al. (1995). Fat-free mass index in users and
    /// nonusers of anabolic-androgenic steroids. *Clin J Sport Med*, 5(4), 223-228.
    pub const FFMI_HEIGHT_SLOPE: f64 = 6.1;

    /// Reference height (m) above which FFMI is normalized
    pub const FFMI_REFERENCE_HEIGHT_M: f64 = 1.8;
}

/// Ideal body weight formulas: base kg at 5 ft, kg per inch above 5 ft
pub mod ideal_weight {
    /// Centimeters per inch
    pub const CM_PER_INCH: f64 = 2.54;
    /// Height (inches) at which every formula's base weight applies
    pub const BASE_HEIGHT_INCHES: f64 = 60.0;

    /// Devine (1974): male, female
    pub const DEVINE: [[f64; 2]; 2] = [[50.0, 2.3], [45.5, 2.3]];
    /// Robinson (1983): male, female
    pub const ROBINSON: [[f64; 2]; 2] = [[52.0, 1.9], [49.0, 1.7]];
    /// Miller (1983): male, female
    pub const MILLER: [[f64; 2]; 2] = [[56.2, 1.41], [53.1, 1.36]];
    /// Hamwi (1964): male, female
    pub const HAMWI: [[f64; 2]; 2] = [[48.0, 2.7], [45.5, 2.2]];
}

/// Body surface area formulas
pub mod surface_area {
    /// Mosteller (1987) divisor for weight(kg) x height(cm)
    pub const MOSTELLER_DIVISOR: f64 = 3600.0;

    /// Du Bois & Du Bois (1916): constant, weight exponent, height exponent
    pub const DUBOIS: [f64; 3] = [0.007_184, 0.425, 0.725];
}

/// WHO adult BMI limits used for healthy-weight ranges
pub mod bmi {
    /// Lower bound of the normal band
    pub const HEALTHY_MIN: f64 = 18.5;
    /// Upper value of the normal band used for weight ranges
    pub const HEALTHY_MAX: f64 = 24.9;
    /// BMI Prime reference value
    pub const PRIME_REFERENCE: f64 = 25.0;
}

/// Accepted input ranges
pub mod ranges {
    /// Weight (kg), lower bound exclusive
    pub const WEIGHT_KG: (f64, f64) = (0.0, 500.0);
    /// Height (cm), lower bound exclusive
    pub const HEIGHT_CM: (f64, f64) = (0.0, 300.0);
    /// Age (years), inclusive
    pub const AGE_YEARS: (f64, f64) = (1.0, 120.0);
    /// Circumferences (cm), lower bound exclusive
    pub const CIRCUMFERENCE_CM: (f64, f64) = (0.0, 300.0);
    /// Body fat (%), inclusive
    pub const BODY_FAT_PERCENT: (f64, f64) = (0.0, 70.0);
    /// Macro percentages, inclusive
    pub const MACRO_PERCENT: (f64, f64) = (0.0, 100.0);
    /// Explicit calorie budget (kcal/day), lower bound exclusive
    pub const TOTAL_CALORIES: (f64, f64) = (0.0, 10_000.0);
    /// Daily calorie delta (kcal/day), inclusive
    pub const DAILY_CALORIE_DELTA: (f64, f64) = (-5_000.0, 5_000.0);
}
