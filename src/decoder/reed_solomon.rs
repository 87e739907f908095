/// Reed-Solomon error correction for QR codes
/// QR codes use RS over GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
/// GF(256) field operations using log/exp tables
pub struct Gf256;

const PRIMITIVE: u16 = 0x11D;

/// exp[i] = alpha^i, doubled so that log sums need no reduction.
const EXP_TABLE: [u8; 512] = build_exp_table();
const LOG_TABLE: [u8; 256] = build_log_table();

const fn build_exp_table() -> [u8; 512] {
    let mut table = [0u8; 512];
    let mut value: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[i] = value as u8;
        table[i + 255] = value as u8;
        value <<= 1;
        if value & 0x100 != 0 {
            value ^= PRIMITIVE;
        }
        i += 1;
    }
    table[510] = table[0];
    table[511] = table[1];
    table
}

const fn build_log_table() -> [u8; 256] {
    let exp = build_exp_table();
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}

impl Gf256 {
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        EXP_TABLE[LOG_TABLE[a as usize] as usize + LOG_TABLE[b as usize] as usize]
    }

    /// `a / b`; `b` must be non-zero.
    pub fn div(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        EXP_TABLE[LOG_TABLE[a as usize] as usize + 255 - LOG_TABLE[b as usize] as usize]
    }

    /// alpha^n
    pub fn exp(n: usize) -> u8 {
        EXP_TABLE[n % 255]
    }

    pub fn inverse(a: u8) -> u8 {
        Self::div(1, a)
    }

    /// Evaluate a polynomial stored lowest degree first.
    fn eval_low_first(poly: &[u8], x: u8) -> u8 {
        poly.iter().rev().fold(0, |acc, &c| Self::mul(acc, x) ^ c)
    }
}

/// Reed-Solomon decoder for QR codes
///
/// Blocks are read with the first codeword as the highest-degree coefficient;
/// the generator has roots alpha^0 .. alpha^(ecc-1).
pub struct ReedSolomonDecoder {
    num_ecc_codewords: usize,
}

impl ReedSolomonDecoder {
    pub fn new(num_ecc_codewords: usize) -> Self {
        Self { num_ecc_codewords }
    }

    /// Correct `block` in place. Returns the number of corrected codewords,
    /// or `None` when the errors exceed the correction capacity.
    pub fn correct(&self, block: &mut [u8]) -> Option<usize> {
        let ecc = self.num_ecc_codewords;
        let n = block.len();
        if ecc == 0 || n <= ecc || n > 255 {
            return None;
        }

        let syndromes = self.syndromes(block);
        if syndromes.iter().all(|&s| s == 0) {
            return Some(0);
        }

        let locator = Self::error_locator(&syndromes)?;
        let positions = Self::error_positions(&locator, n)?;
        let evaluator = Self::error_evaluator(&syndromes, &locator);

        // formal derivative keeps the odd-power terms
        let derivative: Vec<u8> = locator
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| if i % 2 == 1 { c } else { 0 })
            .collect();

        for &i in &positions {
            let x = Gf256::exp(n - 1 - i);
            let x_inv = Gf256::inverse(x);
            let denominator = Gf256::eval_low_first(&derivative, x_inv);
            if denominator == 0 {
                return None;
            }
            let numerator = Gf256::eval_low_first(&evaluator, x_inv);
            block[i] ^= Gf256::mul(x, Gf256::div(numerator, denominator));
        }

        if self.syndromes(block).iter().any(|&s| s != 0) {
            return None;
        }
        Some(positions.len())
    }

    /// S_j = c(alpha^j) for j in 0..ecc.
    fn syndromes(&self, block: &[u8]) -> Vec<u8> {
        (0..self.num_ecc_codewords)
            .map(|j| {
                let x = Gf256::exp(j);
                block.iter().fold(0, |acc, &c| Gf256::mul(acc, x) ^ c)
            })
            .collect()
    }

    /// Berlekamp-Massey. The locator comes back lowest degree first.
    fn error_locator(syndromes: &[u8]) -> Option<Vec<u8>> {
        let mut locator = vec![1u8];
        let mut previous = vec![1u8];
        let mut length = 0usize;
        let mut shift = 1usize;
        let mut last_discrepancy = 1u8;

        for k in 0..syndromes.len() {
            let mut discrepancy = syndromes[k];
            for i in 1..=length.min(locator.len() - 1) {
                discrepancy ^= Gf256::mul(locator[i], syndromes[k - i]);
            }

            if discrepancy == 0 {
                shift += 1;
                continue;
            }

            let coef = Gf256::div(discrepancy, last_discrepancy);
            let mut updated = locator.clone();
            if updated.len() < previous.len() + shift {
                updated.resize(previous.len() + shift, 0);
            }
            for (i, &p) in previous.iter().enumerate() {
                updated[i + shift] ^= Gf256::mul(coef, p);
            }

            if 2 * length <= k {
                previous = std::mem::replace(&mut locator, updated);
                length = k + 1 - length;
                last_discrepancy = discrepancy;
                shift = 1;
            } else {
                locator = updated;
                shift += 1;
            }
        }

        while locator.len() > 1 && locator.last() == Some(&0) {
            locator.pop();
        }
        let degree = locator.len() - 1;
        if degree != length || 2 * length > syndromes.len() {
            return None;
        }
        Some(locator)
    }

    /// Chien search: position i is in error when the locator vanishes at
    /// alpha^-(n-1-i). Every root must land inside the block.
    fn error_positions(locator: &[u8], n: usize) -> Option<Vec<usize>> {
        let positions: Vec<usize> = (0..n)
            .filter(|&i| {
                let x_inv = Gf256::exp(255 - (n - 1 - i) % 255);
                Gf256::eval_low_first(locator, x_inv) == 0
            })
            .collect();
        (positions.len() == locator.len() - 1).then_some(positions)
    }

    /// Omega = S(x) * Lambda(x) mod x^ecc
    fn error_evaluator(syndromes: &[u8], locator: &[u8]) -> Vec<u8> {
        let ecc = syndromes.len();
        let mut omega = vec![0u8; ecc];
        for (i, &s) in syndromes.iter().enumerate() {
            for (j, &l) in locator.iter().enumerate().take(ecc - i) {
                omega[i + j] ^= Gf256::mul(s, l);
            }
        }
        omega
    }
}

/// ECC codewords for `data`, the way an encoder appends them.
#[cfg(test)]
pub(crate) fn encode_ecc(data: &[u8], num_ecc: usize) -> Vec<u8> {
    // generator, highest degree first: prod (x - alpha^i)
    let mut generator = vec![1u8];
    for i in 0..num_ecc {
        let root = Gf256::exp(i);
        let mut next = vec![0u8; generator.len() + 1];
        for (j, &g) in generator.iter().enumerate() {
            next[j] ^= g;
            next[j + 1] ^= Gf256::mul(g, root);
        }
        generator = next;
    }

    let mut remainder = data.to_vec();
    remainder.resize(data.len() + num_ecc, 0);
    for i in 0..data.len() {
        let factor = remainder[i];
        if factor != 0 {
            for (j, &g) in generator.iter().enumerate() {
                remainder[i + j] ^= Gf256::mul(g, factor);
            }
        }
    }
    remainder.split_off(data.len())
}
