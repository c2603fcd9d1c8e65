//! Keccak Merkle tree for whitelist membership proofs.
//!
//! Hashing follows the on-chain verifier: a leaf is `keccak256(0x00 || data)`
//! and an internal node is `keccak256(0x01 || lo || hi)` with the two
//! children sorted bytewise before concatenation. A level with an odd node
//! count promotes its last node unchanged. The 0x00/0x01 prefixes keep leaf
//! hashes and internal hashes in separate domains.

use crate::error::CodecError;

use solana_program::keccak;

pub const HASH_BYTES: usize = 32;

pub type Node = [u8; HASH_BYTES];

/// One step of a membership proof: the sibling hash and which side of the
/// pair it sat on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofStep {
    pub hash: Node,
    pub is_left: bool,
}

/// Immutable commitment to a list of leaves, built once and only queried
/// afterwards.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    layers: Vec<Vec<Node>>,
}

fn hash_leaf(data: &[u8]) -> Node {
    keccak::hashv(&[&[0x00], data]).0
}

fn hash_pair(a: &Node, b: &Node) -> Node {
    if a <= b {
        keccak::hashv(&[&[0x01], a, b]).0
    } else {
        keccak::hashv(&[&[0x01], b, a]).0
    }
}

impl MerkleTree {
    pub fn new<T: AsRef<[u8]>>(leaves: &[T]) -> Self {
        let mut layers = Vec::new();
        let mut level: Vec<Node> = leaves.iter().map(|leaf| hash_leaf(leaf.as_ref())).collect();
        layers.push(level.clone());
        while level.len() > 1 {
            let mut next = Vec::with_capacity((level.len() + 1) / 2);
            for pair in level.chunks(2) {
                match pair {
                    [left, right] => next.push(hash_pair(left, right)),
                    // odd node rides up unchanged
                    [single] => next.push(*single),
                    _ => unreachable!(),
                }
            }
            layers.push(next.clone());
            level = next;
        }
        Self { layers }
    }

    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// Root of the tree, or `None` for an empty leaf list.
    pub fn root(&self) -> Option<Node> {
        self.layers.last().and_then(|top| top.first().copied())
    }

    /// Membership proof for the leaf at `leaf_index`, ordered leaf to root.
    pub fn proof(&self, leaf_index: usize) -> Result<Vec<ProofStep>, CodecError> {
        if leaf_index >= self.leaf_count() {
            return Err(CodecError::IndexOutOfRange);
        }
        let mut steps = Vec::with_capacity(self.layers.len());
        let mut index = leaf_index;
        for layer in &self.layers[..self.layers.len() - 1] {
            let sibling = if index % 2 == 0 { index + 1 } else { index - 1 };
            if let Some(hash) = layer.get(sibling) {
                steps.push(ProofStep {
                    hash: *hash,
                    is_left: sibling < index,
                });
            }
            index /= 2;
        }
        Ok(steps)
    }
}

/// Folds `proof` against `leaf` and compares the result to `root`. The
/// sorted-pair rule makes the fold independent of each step's side flag, so
/// this checks exactly what the on-chain program checks.
pub fn verify(root: Node, leaf: &[u8], proof: &[ProofStep]) -> bool {
    let mut node = hash_leaf(leaf);
    for step in proof {
        node = hash_pair(&node, &step.hash);
    }
    node == root
}
