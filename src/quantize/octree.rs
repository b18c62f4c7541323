use image::{Rgba, RgbaImage};

use super::ColorQuantizer;

/// Octree color quantizer.
///
/// Inserts every RGB triple into a tree of up to `tree_depth` levels, then
/// merges the least-populated deepest nodes until at most `max_colors` leaves
/// remain. Each output pixel maps to the average color of its leaf; alpha is
/// not part of the palette and passes through per pixel.
#[derive(Clone, Copy, Debug, Default)]
pub struct OctreeQuantizer;

impl ColorQuantizer for OctreeQuantizer {
    fn quantize(&self, image: &RgbaImage, max_colors: u16, tree_depth: u8) -> RgbaImage {
        let depth = tree_depth.clamp(1, 8);
        let max = usize::from(max_colors.max(1));

        let mut tree = Octree::new(depth);
        for px in image.pixels() {
            tree.insert([px[0], px[1], px[2]]);
        }
        tree.reduce_to(max);

        let mut out = RgbaImage::new(image.width(), image.height());
        for (src, dst) in image.pixels().zip(out.pixels_mut()) {
            let [r, g, b] = tree.lookup([src[0], src[1], src[2]]);
            *dst = Rgba([r, g, b, src[3]]);
        }
        out
    }
}

struct Node {
    children: [Option<usize>; 8],
    red: u64,
    green: u64,
    blue: u64,
    count: u64,
    leaf: bool,
}

impl Node {
    fn new(leaf: bool) -> Self {
        Self {
            children: [None; 8],
            red: 0,
            green: 0,
            blue: 0,
            count: 0,
            leaf,
        }
    }
}

struct Octree {
    nodes: Vec<Node>,
    /// Interior node ids per level; reduction always merges at the deepest
    /// level that still has interior nodes, so merged children are leaves.
    levels: Vec<Vec<usize>>,
    depth: u8,
    leaves: usize,
}

impl Octree {
    fn new(depth: u8) -> Self {
        let mut levels = vec![Vec::new(); usize::from(depth)];
        levels[0].push(0);
        Self {
            nodes: vec![Node::new(false)],
            levels,
            depth,
            leaves: 0,
        }
    }

    fn insert(&mut self, rgb: [u8; 3]) {
        let mut node = 0usize;
        for level in 0..self.depth {
            if self.nodes[node].leaf {
                break;
            }
            let idx = child_index(rgb, level);
            node = match self.nodes[node].children[idx] {
                Some(child) => child,
                None => {
                    let leaf = level + 1 == self.depth;
                    let child = self.nodes.len();
                    self.nodes.push(Node::new(leaf));
                    self.nodes[node].children[idx] = Some(child);
                    if leaf {
                        self.leaves += 1;
                    } else {
                        self.levels[usize::from(level + 1)].push(child);
                    }
                    child
                }
            };
        }

        let n = &mut self.nodes[node];
        n.red += u64::from(rgb[0]);
        n.green += u64::from(rgb[1]);
        n.blue += u64::from(rgb[2]);
        n.count += 1;
    }

    fn reduce_to(&mut self, max_leaves: usize) {
        while self.leaves > max_leaves {
            let Some(level) = (0..self.levels.len()).rev().find(|&l| !self.levels[l].is_empty())
            else {
                break;
            };

            // Merge the interior node covering the fewest pixels.
            let pick = self.levels[level]
                .iter()
                .enumerate()
                .min_by_key(|&(_, &id)| self.subtree_count(id))
                .map(|(i, _)| i)
                .unwrap_or(0);
            let node = self.levels[level].swap_remove(pick);

            let mut red = 0u64;
            let mut green = 0u64;
            let mut blue = 0u64;
            let mut count = 0u64;
            let mut merged = 0usize;
            for idx in 0..8 {
                if let Some(child) = self.nodes[node].children[idx] {
                    let c = &self.nodes[child];
                    red += c.red;
                    green += c.green;
                    blue += c.blue;
                    count += c.count;
                    merged += 1;
                }
            }

            let n = &mut self.nodes[node];
            n.children = [None; 8];
            n.red += red;
            n.green += green;
            n.blue += blue;
            n.count += count;
            n.leaf = true;

            self.leaves = self.leaves - merged + 1;
        }
    }

    fn subtree_count(&self, node: usize) -> u64 {
        self.nodes[node]
            .children
            .iter()
            .flatten()
            .map(|&c| self.nodes[c].count)
            .sum()
    }

    fn lookup(&self, rgb: [u8; 3]) -> [u8; 3] {
        let mut node = 0usize;
        for level in 0..self.depth {
            let n = &self.nodes[node];
            if n.leaf {
                break;
            }
            match n.children[child_index(rgb, level)] {
                Some(child) => node = child,
                None => break,
            }
        }

        let n = &self.nodes[node];
        if n.count == 0 {
            // Color was never inserted; pass it through.
            return rgb;
        }
        [
            ((n.red + n.count / 2) / n.count) as u8,
            ((n.green + n.count / 2) / n.count) as u8,
            ((n.blue + n.count / 2) / n.count) as u8,
        ]
    }
}

/// Branch selector: one bit per channel at this tree level, high bits first.
fn child_index(rgb: [u8; 3], level: u8) -> usize {
    let bit = 7 - level;
    usize::from(((rgb[0] >> bit) & 1) << 2 | ((rgb[1] >> bit) & 1) << 1 | ((rgb[2] >> bit) & 1))
}

#[cfg(test)]
#[path = "../../tests/unit/quantize/octree.rs"]
mod tests;
