/// Unmask QR code by applying the mask pattern
use crate::decoder::function_mask::FunctionMask;
use crate::models::{BitMatrix, MaskPattern};

/// Unmask a module grid in place. Function modules are never masked.
pub fn unmask(grid: &mut BitMatrix, mask_pattern: MaskPattern, func: &FunctionMask) {
    let dimension = grid.width();

    for y in 0..dimension {
        for x in 0..dimension {
            if !func.is_function(x, y) && mask_pattern.is_masked(y, x) {
                grid.toggle(x, y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Version;

    #[test]
    fn test_unmask() {
        let mut grid = BitMatrix::square(21);
        grid.set(10, 10, true);
        grid.set(10, 11, true);
        grid.set(2, 2, true);

        let func = FunctionMask::new(Version::new(1).unwrap());
        unmask(&mut grid, MaskPattern::Pattern0, &func);

        // (10, 10) is masked and flips back to light, (10, 11) is not masked
        assert!(!grid.get(10, 10));
        assert!(grid.get(10, 11));
        assert!(grid.get(11, 11));
        // finder modules are left alone
        assert!(grid.get(2, 2));
        assert!(!grid.get(0, 0));
    }

    #[test]
    fn test_unmask_twice_restores_grid() {
        let mut grid = BitMatrix::square(25);
        grid.set_region(9, 9, 7, 3);
        let original = grid.clone();
        let func = FunctionMask::new(Version::new(2).unwrap());
        unmask(&mut grid, MaskPattern::Pattern4, &func);
        assert_ne!(grid, original);
        unmask(&mut grid, MaskPattern::Pattern4, &func);
        assert_eq!(grid, original);
    }
}
